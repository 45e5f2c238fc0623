//! One module per effect family. Each exposes the three function slots a
//! `TransformRule` needs: a prompt recognizer, an effect-marker probe, and
//! the pure apply function.

pub mod blocks;
pub mod color;
pub mod layout;
pub mod qrcode;
pub mod typography;
pub mod watermark;
