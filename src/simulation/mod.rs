//! Synthetic Space-Weather Generators
//!
//! Produces plausible randomized measurement batches for every channel that
//! has no live public feed. Each generator is zero-argument and
//! side-effect-free: every call returns a fresh, independently drawn batch.
//! Value ranges are bounded per channel because downstream display and
//! summary logic assume them.

use chrono::{Duration as ChronoDuration, Utc};
use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::types::{
    CoronalHole, Filament, FilamentStability, GeomagneticLevel, ImfBzPoint, KpIndex,
    ProtonFluxPoint, RadioBurst, RadioBurstType, SolarWind, SunspotRegion,
};

// ============================================================================
// Channel Bounds
// ============================================================================

/// Slowest credible solar wind at L1 (km/s)
const WIND_SPEED_FLOOR: f64 = 300.0;
/// Solar wind speed span above the floor (km/s)
const WIND_SPEED_SPAN: f64 = 500.0;
/// Minimum proton density (p/cm³)
const WIND_DENSITY_FLOOR: f64 = 1.0;
/// Proton density span above the floor (p/cm³)
const WIND_DENSITY_SPAN: f64 = 9.0;

/// Proton flux background level (pfu)
const PROTON_BASE_FLUX: f64 = 0.1;
/// Chance per sample of a radiation-storm spike
const PROTON_SPIKE_CHANCE: f64 = 0.05;
/// Points per 24h series at 15-minute cadence
const PROTON_SERIES_LEN: usize = 96;

/// Points per 24h IMF series at 30-minute cadence
const IMF_SERIES_LEN: usize = 48;
/// Hard clamp on |Bz| (nT)
const IMF_BZ_LIMIT: f64 = 20.0;

/// Radio burst spectrograph ceiling (MHz)
const RADIO_MAX_FREQUENCY_MHZ: f64 = 500.0;
/// Radio burst intensity ceiling (SFU)
const RADIO_MAX_INTENSITY_SFU: f64 = 10_000.0;

/// First NOAA active-region number of the current window
const REGION_NUMBER_BASE: u32 = 3700;

// ============================================================================
// Generators
// ============================================================================

/// Bulk solar wind: speed in [300, 800) km/s, density in [1, 10) p/cm³.
pub fn generate_solar_wind() -> SolarWind {
    let mut rng = rand::thread_rng();
    SolarWind {
        speed: WIND_SPEED_FLOOR + rng.gen::<f64>() * WIND_SPEED_SPAN,
        density: WIND_DENSITY_FLOOR + rng.gen::<f64>() * WIND_DENSITY_SPAN,
    }
}

/// 24 hours of integral proton flux at 15-minute cadence.
///
/// Background sits near [`PROTON_BASE_FLUX`] with occasional multiplicative
/// spikes up to 100x simulating a solar radiation storm onset.
pub fn generate_proton_flux() -> Vec<ProtonFluxPoint> {
    let mut rng = rand::thread_rng();
    let now = Utc::now();

    (0..PROTON_SERIES_LEN)
        .map(|i| {
            let offset_min = ((PROTON_SERIES_LEN - i) as i64) * 15;
            let time = now - ChronoDuration::minutes(offset_min);
            let spike = if rng.gen::<f64>() < PROTON_SPIKE_CHANCE {
                rng.gen::<f64>() * 100.0
            } else {
                1.0
            };
            ProtonFluxPoint {
                time: time.format("%H:%M").to_string(),
                flux: PROTON_BASE_FLUX * (1.0 + rng.gen::<f64>() * 0.5) * spike,
            }
        })
        .collect()
}

/// Planetary K-index: integer in [0, 9] with its NOAA category.
pub fn generate_kp_index() -> KpIndex {
    let value = rand::thread_rng().gen_range(0..=9u8);
    KpIndex {
        value,
        level: GeomagneticLevel::from_kp(value),
    }
}

/// HMI sunspot analysis: 2-6 active regions, 1-30 spots each.
pub fn generate_sunspot_regions() -> Vec<SunspotRegion> {
    let mut rng = rand::thread_rng();
    let regions = rng.gen_range(2..=6usize);

    (0..regions)
        .map(|_| SunspotRegion {
            region: format!("AR{}", REGION_NUMBER_BASE + rng.gen_range(0..50)),
            spots: rng.gen_range(1..=30),
        })
        .collect()
}

/// Coronal holes: 1-3 dark outlines with attributed high-speed outflow.
pub fn generate_coronal_holes() -> Vec<CoronalHole> {
    let mut rng = rand::thread_rng();
    let count = rng.gen_range(1..=3usize);

    (0..count)
        .map(|i| CoronalHole {
            id: format!("CH-{}", i + 1),
            outline: disk_blob_path(&mut rng),
            max_wind_speed: rng.gen_range(500.0..=800.0),
        })
        .collect()
}

/// Filament channels: 1-4 traced arcs, each stable or unstable.
pub fn generate_filaments() -> Vec<Filament> {
    let mut rng = rand::thread_rng();
    let count = rng.gen_range(1..=4usize);

    (0..count)
        .map(|i| Filament {
            id: format!("FIL-{}", i + 1),
            outline: disk_arc_path(&mut rng),
            stability: if rng.gen_bool(0.4) {
                FilamentStability::Unstable
            } else {
                FilamentStability::Stable
            },
        })
        .collect()
}

/// Radio bursts across the observation day: 0-12 Type II/III events.
pub fn generate_radio_bursts() -> Vec<RadioBurst> {
    let mut rng = rand::thread_rng();
    let count = rng.gen_range(0..=12usize);

    (0..count)
        .map(|_| RadioBurst {
            minute_of_day: rng.gen_range(0..1440),
            frequency_mhz: rng.gen::<f64>() * RADIO_MAX_FREQUENCY_MHZ,
            intensity_sfu: rng.gen::<f64>() * RADIO_MAX_INTENSITY_SFU,
            burst_type: if rng.gen_bool(0.3) {
                RadioBurstType::TypeII
            } else {
                RadioBurstType::TypeIII
            },
        })
        .collect()
}

/// 24 hours of IMF Bz at 30-minute cadence.
///
/// Modeled as a Gaussian random walk clamped to ±20 nT so sustained
/// southward excursions occur but stay physical.
pub fn generate_imf_bz() -> Vec<ImfBzPoint> {
    let mut rng = rand::thread_rng();
    let step = Normal::new(0.0f64, 2.0).expect("valid distribution parameters");
    let now = Utc::now();
    let mut bz: f64 = rng.gen_range(-5.0..5.0);

    (0..IMF_SERIES_LEN)
        .map(|i| {
            let offset_min = ((IMF_SERIES_LEN - i) as i64) * 30;
            let time = now - ChronoDuration::minutes(offset_min);
            bz = (bz + step.sample(&mut rng)).clamp(-IMF_BZ_LIMIT, IMF_BZ_LIMIT);
            ImfBzPoint {
                time: time.format("%H:%M").to_string(),
                bz,
            }
        })
        .collect()
}

// ============================================================================
// Disk Geometry Helpers
// ============================================================================

/// Closed quadratic blob on the 512x512 disk projection.
fn disk_blob_path(rng: &mut impl Rng) -> String {
    let cx = rng.gen_range(120..392);
    let cy = rng.gen_range(120..392);
    let r = rng.gen_range(25..70);
    format!(
        "M {} {} q {} {} {} 0 q {} {} {} 0 Z",
        cx - r,
        cy,
        r,
        -r * 2,
        r * 2,
        r,
        r * 2,
        -r * 2
    )
}

/// Open curved arc on the 512x512 disk projection.
fn disk_arc_path(rng: &mut impl Rng) -> String {
    let x = rng.gen_range(100..300);
    let y = rng.gen_range(100..400);
    let dx = rng.gen_range(60..160);
    let bend = rng.gen_range(-60..60);
    format!("M {x} {y} q {} {bend} {dx} 0", dx / 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DRAWS: usize = 10_000;

    #[test]
    fn test_solar_wind_bounds() {
        for _ in 0..DRAWS {
            let wind = generate_solar_wind();
            assert!((300.0..800.0).contains(&wind.speed), "speed {}", wind.speed);
            assert!(
                (1.0..10.0).contains(&wind.density),
                "density {}",
                wind.density
            );
        }
    }

    #[test]
    fn test_kp_index_bounds_and_level() {
        for _ in 0..DRAWS {
            let kp = generate_kp_index();
            assert!(kp.value <= 9);
            assert_eq!(kp.level, GeomagneticLevel::from_kp(kp.value));
        }
    }

    #[test]
    fn test_proton_flux_series_shape() {
        let series = generate_proton_flux();
        assert_eq!(series.len(), 96);
        for point in &series {
            assert!(point.flux > 0.0);
            // "HH:MM"
            assert_eq!(point.time.len(), 5);
            assert_eq!(&point.time[2..3], ":");
        }
    }

    #[test]
    fn test_sunspot_regions_bounds() {
        for _ in 0..1_000 {
            let regions = generate_sunspot_regions();
            assert!((2..=6).contains(&regions.len()));
            for r in &regions {
                assert!(r.region.starts_with("AR37"));
                assert!((1..=30).contains(&r.spots));
            }
        }
    }

    #[test]
    fn test_coronal_holes_bounds() {
        for _ in 0..1_000 {
            let holes = generate_coronal_holes();
            assert!((1..=3).contains(&holes.len()));
            for hole in &holes {
                assert!((500.0..=800.0).contains(&hole.max_wind_speed));
                assert!(hole.outline.starts_with('M'));
            }
        }
    }

    #[test]
    fn test_radio_burst_bounds() {
        for _ in 0..1_000 {
            for burst in generate_radio_bursts() {
                assert!(burst.minute_of_day < 1440);
                assert!(burst.frequency_mhz <= RADIO_MAX_FREQUENCY_MHZ);
                assert!(burst.intensity_sfu <= RADIO_MAX_INTENSITY_SFU);
            }
        }
    }

    #[test]
    fn test_imf_bz_clamped() {
        for _ in 0..100 {
            let series = generate_imf_bz();
            assert_eq!(series.len(), 48);
            for point in &series {
                assert!(point.bz.abs() <= IMF_BZ_LIMIT);
            }
        }
    }

    #[test]
    fn test_generators_draw_independently() {
        // No seeding or memoization: consecutive series must differ.
        let a = generate_proton_flux();
        let b = generate_proton_flux();
        assert_ne!(
            a.iter().map(|p| p.flux).collect::<Vec<_>>(),
            b.iter().map(|p| p.flux).collect::<Vec<_>>()
        );
    }
}
