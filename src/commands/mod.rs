pub mod doctor;
pub mod fetch;
pub mod unpack;
