//! Image XObject embedding.

use super::deflate;
use crate::error::Result;
use crate::model::{ColorChannels, JpegColor, PixelData, Resource};
use pdf_writer::{Filter, Pdf, Ref};

/// Write `resource` as an image XObject at `image_id`.
///
/// JPEG streams are embedded unchanged with `DCTDecode`. Raw samples are
/// optionally Flate-compressed, and an alpha channel becomes a soft mask
/// allocated from `next_ref`.
pub(super) fn embed_image(
    pdf: &mut Pdf,
    image_id: Ref,
    next_ref: &mut i32,
    resource: &Resource,
    compress: bool,
) -> Result<()> {
    let width = resource.width as i32;
    let height = resource.height as i32;

    match &resource.pixels {
        PixelData::Jpeg { data, color } => {
            let mut xobject = pdf.image_xobject(image_id, data);
            xobject.filter(Filter::DctDecode);
            xobject.width(width);
            xobject.height(height);
            match color {
                JpegColor::Gray => xobject.color_space().device_gray(),
                JpegColor::Rgb => xobject.color_space().device_rgb(),
            };
            xobject.bits_per_component(8);
        }
        PixelData::Raw {
            channels,
            samples,
            alpha,
        } => {
            // Soft mask first so the two XObject writers never overlap.
            let smask_id = match alpha {
                Some(alpha) => {
                    let smask_id = Ref::new(*next_ref);
                    *next_ref += 1;
                    let payload = encode_samples(alpha, compress)?;
                    let mut smask = pdf.image_xobject(smask_id, &payload);
                    if compress {
                        smask.filter(Filter::FlateDecode);
                    }
                    smask.width(width);
                    smask.height(height);
                    smask.color_space().device_gray();
                    smask.bits_per_component(8);
                    Some(smask_id)
                }
                None => None,
            };

            let payload = encode_samples(samples, compress)?;
            let mut xobject = pdf.image_xobject(image_id, &payload);
            if compress {
                xobject.filter(Filter::FlateDecode);
            }
            xobject.width(width);
            xobject.height(height);
            match channels {
                ColorChannels::Gray => xobject.color_space().device_gray(),
                ColorChannels::Rgb => xobject.color_space().device_rgb(),
            };
            xobject.bits_per_component(8);
            if let Some(smask_id) = smask_id {
                xobject.s_mask(smask_id);
            }
        }
    }

    Ok(())
}

fn encode_samples(samples: &[u8], compress: bool) -> Result<Vec<u8>> {
    if compress {
        deflate(samples)
    } else {
        Ok(samples.to_vec())
    }
}
