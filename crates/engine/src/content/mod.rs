mod sprites;

pub use sprites::{ContentError, SpriteCatalog, SpriteDef, SpriteImage};
