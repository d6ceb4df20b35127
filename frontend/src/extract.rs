use std::io::Cursor;

use sdpeek_common::{RawField, RawMetadata};

/// Read embedded text metadata from image bytes.
///
/// Only PNG is supported: webui embeds its `parameters` field in a
/// tEXt chunk, with zTXt/iTXt fallbacks for long or non-latin1 values.
pub fn extract_metadata(data: &[u8]) -> anyhow::Result<RawMetadata> {
    let mut cursor = Cursor::new(data);
    let reader = png::Decoder::new(&mut cursor).read_info()?;
    let info = reader.info();

    let mut tags = RawMetadata::new();

    for entry in &info.uncompressed_latin1_text {
        tags.insert(
            entry.keyword.clone(),
            RawField { value: entry.text.clone() }
        );
    }
    for entry in &info.compressed_latin1_text {
        if let Ok(text) = entry.get_text() {
            tags.insert(entry.keyword.clone(), RawField { value: text });
        }
    }
    for entry in &info.utf8_text {
        if let Ok(text) = entry.get_text() {
            tags.insert(entry.keyword.clone(), RawField { value: text });
        }
    }

    Ok(tags)
}

#[test]
fn test_extract_text_chunk() {
    let mut data = vec![];
    {
        let mut encoder = png::Encoder::new(&mut data, 1, 1);
        encoder.set_color(png::ColorType::Grayscale);
        encoder.set_depth(png::BitDepth::Eight);
        encoder
            .add_text_chunk(
                "parameters".to_string(),
                "1girl\nSteps: 20, Sampler: Euler".to_string()
            )
            .unwrap();
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(&[0]).unwrap();
    }

    let tags = extract_metadata(&data).unwrap();
    assert_eq!(tags["parameters"].value, "1girl\nSteps: 20, Sampler: Euler");
}

#[test]
fn test_extract_rejects_non_png() {
    assert!(extract_metadata(b"not a png").is_err());
}
