use image::{DynamicImage, GrayImage, Luma};
use nalgebra::Vector3;
use unflattener::{Direction, DirectionalSet};

/// Unit vector pointing from the sprite towards a light on `direction`.
pub fn light_vector(direction: Direction) -> Vector3<f64> {
    match direction {
        Direction::Top => Vector3::y(),
        Direction::Bottom => -Vector3::y(),
        Direction::Left => -Vector3::x(),
        Direction::Right => Vector3::x(),
    }
}

/// Surface normal of a centred hemisphere of radius `radius`; flat outside.
///
/// Image rows grow downwards, so the upper half of the dome faces +y.
pub fn dome_normal(width: usize, height: usize, radius: f64, x: usize, y: usize) -> Vector3<f64> {
    let cx = (width as f64 - 1.0) / 2.0;
    let cy = (height as f64 - 1.0) / 2.0;
    let dx = (x as f64 - cx) / radius;
    let dy = (cy - y as f64) / radius;
    let planar = dx * dx + dy * dy;
    if planar >= 1.0 {
        return Vector3::z();
    }
    Vector3::new(dx, dy, (1.0 - planar).sqrt())
}

/// Render the dome lit from `direction` as an 8-bit grayscale image.
pub fn dome_lit_u8(width: usize, height: usize, radius: f64, direction: Direction) -> GrayImage {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    let light = light_vector(direction);
    GrayImage::from_fn(width as u32, height as u32, |x, y| {
        let n = dome_normal(width, height, radius, x as usize, y as usize);
        let v = n.dot(&light).max(0.0);
        Luma([(v * 255.0).round() as u8])
    })
}

/// All four d-lit renditions of the dome.
pub fn dome_set(width: usize, height: usize, radius: f64) -> DirectionalSet<DynamicImage> {
    let mut set = DirectionalSet::default();
    for direction in Direction::ALL {
        *set.slot_mut(direction) = Some(DynamicImage::ImageLuma8(dome_lit_u8(
            width, height, radius, direction,
        )));
    }
    set
}

/// Uniform grayscale image.
pub fn uniform_u8(width: u32, height: u32, value: u8) -> DynamicImage {
    DynamicImage::ImageLuma8(GrayImage::from_pixel(width, height, Luma([value])))
}
