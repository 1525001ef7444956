//! Post-processing settings consumed by the host's effect composer

/// Bloom pass parameters
#[derive(Debug, Clone, Copy)]
pub struct BloomSettings {
    pub strength: f32,
    pub radius: f32,
    pub threshold: f32,
}

impl Default for BloomSettings {
    fn default() -> Self {
        BloomSettings {
            strength: 1.0,
            radius: 0.4,
            threshold: 0.85,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PostSettings {
    pub bloom: BloomSettings,
    /// When false the host renders directly, skipping the composer
    pub enabled: bool,
}

impl Default for PostSettings {
    fn default() -> Self {
        PostSettings {
            bloom: BloomSettings::default(),
            enabled: true,
        }
    }
}

impl PostSettings {
    pub fn set_bloom_strength(&mut self, strength: f32) {
        self.bloom.strength = strength;
    }

    /// Performance mode trades bloom for frame rate
    pub fn set_performance_mode(&mut self, on: bool) {
        self.enabled = !on;
    }

    pub fn composer_enabled(&self) -> bool {
        self.enabled
    }
}
