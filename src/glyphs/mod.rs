mod class_map;
mod translator;

pub use class_map::ClassMap;
pub use translator::GlyphTranslator;
