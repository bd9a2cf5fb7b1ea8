pub mod avl;
pub mod bst;

pub use avl::AvlTree;
pub use bst::RangeMinTree;
