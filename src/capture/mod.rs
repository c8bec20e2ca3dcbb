pub mod camera;
pub mod video;

pub use camera::Camera;
pub use video::VideoSource;
