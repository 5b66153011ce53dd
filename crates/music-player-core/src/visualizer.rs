use crate::config::VisualizerConfig;
use crate::graph::SpectrumSource;

/// Drawing area in the renderer's units (pixels or egui points).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Surface {
    pub width: f32,
    pub height: f32,
}

/// One bar of the spectrum chart, origin at the surface's top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bar {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Per-frame spectrum sampler. Reuses its buffers between frames.
pub struct Visualizer {
    style: VisualizerConfig,
    samples: Vec<u8>,
    bars: Vec<Bar>,
}

impl Visualizer {
    pub fn new(style: VisualizerConfig) -> Self {
        Self {
            style,
            samples: Vec::new(),
            bars: Vec::new(),
        }
    }

    pub fn style(&self) -> &VisualizerConfig {
        &self.style
    }

    pub fn color(&self) -> [u8; 3] {
        self.style.bar_color
    }

    /// Latest magnitudes pulled by [`Visualizer::frame`].
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// Pull the current magnitudes and lay out one bar per bin. The caller
    /// clears the surface and paints the returned bars.
    pub fn frame(&mut self, source: &impl SpectrumSource, surface: Surface) -> &[Bar] {
        let bins = source.bin_count();
        self.samples.resize(bins, 0);
        source.fill_frequency_data(&mut self.samples);
        self.layout(surface);
        &self.bars
    }

    fn layout(&mut self, surface: Surface) {
        self.bars.clear();
        let bins = self.samples.len();
        if bins == 0 || surface.width <= 0.0 || surface.height <= 0.0 {
            return;
        }

        let bar_width = surface.width / bins as f32 * self.style.bar_width_factor;
        let mut x = 0.0;
        for &magnitude in &self.samples {
            let height = f32::from(magnitude) * self.style.height_scale;
            self.bars.push(Bar {
                x,
                y: surface.height - height,
                width: bar_width,
                height,
            });
            x += bar_width + self.style.bar_spacing;
        }
    }
}
