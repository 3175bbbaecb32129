pub mod commit;
pub mod object_id;
pub mod object_type;
pub mod tree;

pub const OBJECT_ID_LENGTH: usize = 40;
