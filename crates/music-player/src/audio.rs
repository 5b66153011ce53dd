use music_player_core::{Band, FilterShape, GraphTopology, SpectrumSource, Stage};
use wasm_bindgen::prelude::*;
use web_sys::{
    AnalyserNode, AudioContext, AudioContextState, AudioNode, BiquadFilterNode, BiquadFilterType,
    GainNode, HtmlMediaElement,
};

/// The topology realized as Web Audio nodes, connected in stage order.
///
/// Building it claims the media element's one and only source node, so a
/// page gets exactly one of these.
pub struct WebAudioGraph {
    context: AudioContext,
    filters: Vec<(Band, BiquadFilterNode)>,
    gain: Option<GainNode>,
    analyser: AnalyserNode,
}

impl WebAudioGraph {
    pub fn realize(topology: &GraphTopology, element: &HtmlMediaElement) -> Result<Self, JsValue> {
        let context = AudioContext::new()?;
        let mut filters = Vec::new();
        let mut gain = None;
        let mut analyser = None;
        let mut previous: Option<AudioNode> = None;

        for stage in topology.stages() {
            let node: AudioNode = match stage {
                Stage::Source => context.create_media_element_source(element)?.into(),
                Stage::Filter {
                    band,
                    shape,
                    frequency_hz,
                    gain_db,
                } => {
                    let filter = context.create_biquad_filter()?;
                    filter.set_type(biquad_type(*shape));
                    filter.frequency().set_value(*frequency_hz);
                    filter.gain().set_value(*gain_db);
                    filters.push((*band, filter.clone()));
                    filter.into()
                }
                Stage::Gain { level } => {
                    let node = context.create_gain()?;
                    node.gain().set_value(*level);
                    gain = Some(node.clone());
                    node.into()
                }
                Stage::Analyser { fft_size } => {
                    let node = context.create_analyser()?;
                    node.set_fft_size(*fft_size);
                    analyser = Some(node.clone());
                    node.into()
                }
                Stage::Destination => context.destination().into(),
            };
            if let Some(prev) = &previous {
                prev.connect_with_audio_node(&node)?;
            }
            previous = Some(node);
        }

        let analyser = analyser.ok_or("signal graph has no analyser stage")?;
        log::info!(
            "audio graph wired: {} stages, {} spectrum bins",
            topology.stages().len(),
            analyser.frequency_bin_count()
        );
        Ok(Self {
            context,
            filters,
            gain,
            analyser,
        })
    }

    pub fn set_filter_gain(&self, band: Band, gain_db: f32) {
        if let Some((_, filter)) = self.filters.iter().find(|(b, _)| *b == band) {
            filter.gain().set_value(gain_db);
        }
    }

    pub fn set_level(&self, level: f32) {
        if let Some(gain) = &self.gain {
            gain.gain().set_value(level);
        }
    }

    pub fn is_suspended(&self) -> bool {
        self.context.state() == AudioContextState::Suspended
    }

    pub fn resume(&self) -> Result<js_sys::Promise, JsValue> {
        self.context.resume()
    }
}

impl SpectrumSource for WebAudioGraph {
    fn bin_count(&self) -> usize {
        self.analyser.frequency_bin_count() as usize
    }

    fn fill_frequency_data(&self, out: &mut [u8]) {
        self.analyser.get_byte_frequency_data(out);
    }
}

fn biquad_type(shape: FilterShape) -> BiquadFilterType {
    match shape {
        FilterShape::LowShelf => BiquadFilterType::Lowshelf,
        FilterShape::Peaking => BiquadFilterType::Peaking,
        FilterShape::HighShelf => BiquadFilterType::Highshelf,
    }
}
