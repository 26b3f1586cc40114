pub mod content;
pub mod landing;
