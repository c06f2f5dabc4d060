//! Request bodies used across tests.

use axum_test::multipart::{MultipartForm, Part};
use image::{ImageFormat, Rgb, RgbImage};
use std::io::Cursor;

/// A solid-colour image of the given size in the given format.
pub fn create_image(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb([180, 40, 90]));
    let mut buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut buffer), format)
        .expect("encode test image");
    buffer
}

pub fn create_png(width: u32, height: u32) -> Vec<u8> {
    create_image(width, height, ImageFormat::Png)
}

/// Text fields of a valid submission.
pub fn ada_fields() -> Vec<(&'static str, &'static str)> {
    vec![
        ("fname", "Ada"),
        ("lname", "Lovelace"),
        ("email", "ada@example.com"),
        ("address", "1 Infinite Loop"),
        ("city", "X"),
        ("state", "CA"),
        ("zip", "94000"),
    ]
}

/// Build an upload form from text fields and an optional file.
pub fn upload_form(fields: &[(&'static str, &'static str)], file: Option<Vec<u8>>) -> MultipartForm {
    let mut form = MultipartForm::new();
    for (name, value) in fields {
        form = form.add_text(*name, *value);
    }
    if let Some(data) = file {
        let part = Part::bytes(bytes::Bytes::from(data))
            .file_name("image.png")
            .mime_type("image/png");
        form = form.add_part("file", part);
    }
    form
}

/// Valid submission with a file of the given size.
pub fn ada_upload(width: u32, height: u32) -> MultipartForm {
    upload_form(&ada_fields(), Some(create_png(width, height)))
}

/// Valid submission fields with one field replaced.
pub fn ada_fields_with(name: &'static str, value: &'static str) -> Vec<(&'static str, &'static str)> {
    ada_fields()
        .into_iter()
        .map(|(n, v)| if n == name { (n, value) } else { (n, v) })
        .collect()
}
