//! Инфраструктурный слой вокруг движка стола:
//! - RNG-реализации для движка;
//! - инициализация логирования.

pub mod logging;
pub mod rng;

pub use rng::*;
