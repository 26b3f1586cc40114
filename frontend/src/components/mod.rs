pub mod faq;
pub mod header;
pub mod in_view;
pub mod integrations;
pub mod stats;
pub mod tabs;
