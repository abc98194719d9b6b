pub mod bounds;
pub mod obj_line;
