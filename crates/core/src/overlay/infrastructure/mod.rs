pub mod bitmap_renderer;
