//! 한국어 G2P 핵심 변환 로직

pub mod pipeline;
pub mod romanizer;
pub mod rules;
pub mod symbols;
pub mod tables;
pub mod unicode;
