pub mod border_detector;
pub mod dir_walker;
pub mod pixel;
pub mod road_document;
pub mod track_filter;

#[cfg(test)]
pub mod utils;
