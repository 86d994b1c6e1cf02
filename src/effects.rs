use rand::Rng;
use rand::seq::SliceRandom;

/// Optional cosmetic transforms applied to every registered clip.
///
/// A transform is skipped only when its field is unset; supplying an explicit
/// value, including zero, applies it.
#[derive(Debug, Clone, Default)]
pub struct EffectSettings {
    /// Fade-in duration in seconds
    pub fade_in: Option<f64>,
    /// Fade-out duration in seconds
    pub fade_out: Option<f64>,
    /// Uniform RGB multiplier
    pub color_multiplier: Option<f64>,
    /// Gamma correction value
    pub gamma: Option<f64>,
    /// Flip the picture horizontally
    pub mirror_horizontal: bool,
    /// Flip the picture vertically
    pub mirror_vertical: bool,
}

impl EffectSettings {
    pub fn is_empty(&self) -> bool {
        self.fade_in.is_none()
            && self.fade_out.is_none()
            && self.color_multiplier.is_none()
            && self.gamma.is_none()
            && !self.mirror_horizontal
            && !self.mirror_vertical
    }
}

/// Build the ffmpeg filter chain for one clip.
///
/// The order is fixed: fade-in, fade-out, color multiply, gamma, horizontal
/// mirror, vertical mirror. The fade-out start position is derived from the
/// clip duration, clamped at zero for fades longer than the clip.
pub fn filter_chain(settings: &EffectSettings, duration: f64) -> Vec<String> {
    let mut filters = Vec::new();

    if let Some(fade_in) = settings.fade_in {
        filters.push(format!("fade=t=in:st=0:d={}", fade_in));
    }
    if let Some(fade_out) = settings.fade_out {
        let start = (duration - fade_out).max(0.0);
        filters.push(format!("fade=t=out:st={}:d={}", start, fade_out));
    }
    if let Some(multiplier) = settings.color_multiplier {
        filters.push(format!(
            "colorchannelmixer=rr={m}:gg={m}:bb={m}",
            m = multiplier
        ));
    }
    if let Some(gamma) = settings.gamma {
        filters.push(format!("eq=gamma={}", gamma));
    }
    if settings.mirror_horizontal {
        filters.push("hflip".to_string());
    }
    if settings.mirror_vertical {
        filters.push("vflip".to_string());
    }

    filters
}

const CHANNELS: &[char] = &['r', 'g', 'b'];
// 's' shadows; 'm' midtones and 'h' highlights stay off
const TONAL_RANGES: &[char] = &['s'];

/// Build one randomized color-balance directive, e.g. `colorbalance=rs=0.073`.
///
/// One candidate is generated per channel/range pair, each with its own
/// uniform offset in [-0.15, 0.15], and a single candidate is chosen.
pub fn color_balance_directive() -> String {
    let mut rng = rand::thread_rng();
    let mut candidates = Vec::new();

    for channel in CHANNELS {
        for range in TONAL_RANGES {
            let offset: f64 = rng.gen_range(-0.15..=0.15);
            candidates.push(format!("colorbalance={}{}={:.3}", channel, range, offset));
        }
    }

    candidates.choose(&mut rng).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_settings_build_empty_chain() {
        let settings = EffectSettings::default();
        assert!(settings.is_empty());
        assert!(filter_chain(&settings, 10.0).is_empty());
    }

    #[test]
    fn test_chain_order_is_fixed() {
        let settings = EffectSettings {
            fade_in: Some(1.0),
            fade_out: Some(2.0),
            color_multiplier: Some(1.2),
            gamma: Some(0.9),
            mirror_horizontal: true,
            mirror_vertical: true,
        };

        let chain = filter_chain(&settings, 10.0);
        assert_eq!(
            chain,
            vec![
                "fade=t=in:st=0:d=1",
                "fade=t=out:st=8:d=2",
                "colorchannelmixer=rr=1.2:gg=1.2:bb=1.2",
                "eq=gamma=0.9",
                "hflip",
                "vflip",
            ]
        );
    }

    #[test]
    fn test_zero_color_multiplier_is_applied() {
        // Presence decides, not the value: an explicit 0.0 emits the filter.
        let settings = EffectSettings {
            color_multiplier: Some(0.0),
            ..Default::default()
        };

        let chain = filter_chain(&settings, 10.0);
        assert_eq!(chain, vec!["colorchannelmixer=rr=0:gg=0:bb=0"]);
    }

    #[test]
    fn test_fade_out_start_clamps_at_zero() {
        let settings = EffectSettings {
            fade_out: Some(20.0),
            ..Default::default()
        };

        let chain = filter_chain(&settings, 10.0);
        assert_eq!(chain, vec!["fade=t=out:st=0:d=20"]);
    }

    #[test]
    fn test_color_balance_directive_shape() {
        for _ in 0..50 {
            let directive = color_balance_directive();
            let value = directive.strip_prefix("colorbalance=").unwrap();
            let (target, offset) = value.split_once('=').unwrap();

            let mut chars = target.chars();
            let channel = chars.next().unwrap();
            let range = chars.next().unwrap();
            assert!(matches!(channel, 'r' | 'g' | 'b'));
            assert_eq!(range, 's');

            let offset: f64 = offset.parse().unwrap();
            assert!(offset.abs() <= 0.15);
        }
    }
}
