pub mod markup;
pub mod unicode;
