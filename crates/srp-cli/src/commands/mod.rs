pub mod claim;
pub mod dispatch;
pub mod fit;
pub mod resolve;
pub mod shared;
