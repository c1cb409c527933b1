use crate::renderer::fonts::FontConfig;
use image::{Rgba, RgbaImage};
use imageproc::drawing::{
    draw_filled_circle_mut, draw_filled_rect_mut, draw_hollow_rect_mut, draw_text_mut,
};
use imageproc::rect::Rect;

pub fn fill(image: &mut RgbaImage, colour: Rgba<u8>) {
    for pixel in image.pixels_mut() {
        *pixel = colour;
    }
}

pub fn card(
    image: &mut RgbaImage,
    x: i32,
    y: i32,
    width: u32,
    height: u32,
    background: Rgba<u8>,
    border: Rgba<u8>,
) {
    draw_filled_rect_mut(image, Rect::at(x, y).of_size(width, height), background);
    draw_hollow_rect_mut(image, Rect::at(x, y).of_size(width, height), border);
}

pub fn dot(image: &mut RgbaImage, x: i32, y: i32, radius: i32, colour: Rgba<u8>) {
    draw_filled_circle_mut(image, (x, y), radius, colour);
}

pub fn text(
    image: &mut RgbaImage,
    colour: Rgba<u8>,
    x: i32,
    y: i32,
    font_config: &FontConfig,
    text: &str,
) {
    draw_text_mut(
        image,
        colour,
        x,
        y,
        font_config.scale,
        &font_config.font,
        text,
    );
}
