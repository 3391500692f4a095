pub mod scan;
pub mod streamer;
