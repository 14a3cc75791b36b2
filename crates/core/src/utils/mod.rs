pub mod id_utils;
pub mod text_utils;
