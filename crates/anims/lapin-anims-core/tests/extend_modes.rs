use std::collections::BTreeMap;

use approx::assert_abs_diff_eq;
use lapin_anims_core::{lerp, Anim, ExtendMode};
use serde::Deserialize;

#[derive(Deserialize)]
struct ExtendTable {
    start: f32,
    end: f32,
    startt: f32,
    endt: f32,
    modes: BTreeMap<String, Vec<(f32, f32)>>,
}

fn build(table: &ExtendTable, extend: ExtendMode) -> Anim {
    lerp()
        .start(table.start)
        .end(table.end)
        .startt(table.startt)
        .endt(table.endt)
        .extend(extend)
        .build()
        .unwrap()
        .into_anim()
        .unwrap()
}

#[test]
fn modes_match_expected_tables() -> anyhow::Result<()> {
    let table: ExtendTable = lapin_test_fixtures::curves::load("extend-modes")?;
    assert_eq!(table.modes.len(), 4);
    for (mode, samples) in &table.modes {
        let anim = build(&table, mode.parse()?);
        for (t, v) in samples {
            assert_abs_diff_eq!(anim.evaluate(*t)?, *v, epsilon = 1e-5);
        }
    }
    Ok(())
}

#[test]
fn constant_mode_is_exact_outside_the_range() {
    let anim = lerp()
        .start(0.3)
        .end(0.7)
        .startt(1.0)
        .endt(4.0)
        .build()
        .unwrap()
        .into_anim()
        .unwrap();
    assert_eq!(anim.evaluate(-100.0).unwrap(), 0.3);
    assert_eq!(anim.evaluate(1.0).unwrap(), 0.3);
    assert_eq!(anim.evaluate(4.0).unwrap(), 0.7);
    assert_eq!(anim.evaluate(1e6).unwrap(), 0.7);
}

#[test]
fn repeat_is_periodic() {
    let anim = lerp()
        .start(2.0)
        .end(6.0)
        .startt(0.0)
        .endt(4.0)
        .extend(ExtendMode::Repeat)
        .build()
        .unwrap()
        .into_anim()
        .unwrap();
    for k in [-3, -1, 1, 2, 5] {
        for x in [0.0_f32, 0.5, 1.0, 2.5, 3.75] {
            let shifted = k as f32 * 4.0 + x;
            assert_abs_diff_eq!(
                anim.evaluate(shifted).unwrap(),
                anim.evaluate(x).unwrap(),
                epsilon = 1e-4
            );
        }
    }
}

#[test]
fn reverse_mirrors_around_endt() {
    let anim = lerp()
        .start(-1.0)
        .end(1.0)
        .startt(2.0)
        .endt(6.0)
        .extend(ExtendMode::Reverse)
        .build()
        .unwrap()
        .into_anim()
        .unwrap();
    for x in [0.0_f32, 0.5, 1.0, 2.0, 3.5, 4.0] {
        assert_abs_diff_eq!(
            anim.evaluate(6.0 + x).unwrap(),
            anim.evaluate(6.0 - x).unwrap(),
            epsilon = 1e-5
        );
    }
}

#[test]
fn only_constant_mode_settles() {
    let table = ExtendTable {
        start: 0.0,
        end: 1.0,
        startt: 0.0,
        endt: 1.0,
        modes: BTreeMap::new(),
    };
    assert!(build(&table, ExtendMode::Constant).sample(2.0).unwrap().settled);
    for mode in [ExtendMode::Extrapolate, ExtendMode::Repeat, ExtendMode::Reverse] {
        assert!(!build(&table, mode).sample(2.0).unwrap().settled);
    }
}
