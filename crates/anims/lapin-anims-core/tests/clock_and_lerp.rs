use approx::assert_abs_diff_eq;
use lapin_anims_core::{
    ease, ease_in, ease_out, lerp, Anim, AnimError, Clock, Easing, Params, Sample,
};
use serde::Deserialize;

#[derive(Deserialize)]
struct LerpTable {
    start: f32,
    end: f32,
    startt: f32,
    dt: f32,
    samples: Vec<(f32, f32)>,
}

#[test]
fn lerp_matches_fixture_samples() -> anyhow::Result<()> {
    let table: LerpTable = lapin_test_fixtures::curves::load("lerp-basic")?;
    let anim = lerp()
        .start(table.start)
        .end(table.end)
        .startt(table.startt)
        .dt(table.dt)
        .build()?
        .into_anim()
        .expect("all parameters given");
    for (t, v) in table.samples {
        assert_eq!(anim.evaluate(t)?, v, "t={t}");
    }
    Ok(())
}

#[test]
fn lerp_is_linear_inside_its_range() {
    let (a, b, startt, endt) = (-3.0_f32, 17.0_f32, 2.0_f32, 6.0_f32);
    let anim = lerp()
        .start(a)
        .end(b)
        .startt(startt)
        .endt(endt)
        .build()
        .unwrap()
        .into_anim()
        .unwrap();
    for i in 1..40 {
        let t = startt + (endt - startt) * i as f32 / 40.0;
        let expected = a + (b - a) * (t - startt) / (endt - startt);
        assert_abs_diff_eq!(anim.evaluate(t).unwrap(), expected, epsilon = 1e-4);
    }
}

#[test]
fn reading_follows_the_clock() {
    let clock = Clock::new();
    let anim = lerp()
        .start(10.0)
        .end(100.0)
        .startt(clock.get_time())
        .dt(1.0)
        .build()
        .unwrap()
        .force(&clock)
        .unwrap();
    assert_eq!(anim.get(&clock).unwrap(), 10.0);
    clock.add_time(0.5);
    assert_eq!(anim.get(&clock).unwrap(), 55.0);
    clock.add_time(0.5);
    assert_eq!(anim.get(&clock).unwrap(), 100.0);
}

#[test]
fn independent_clocks_do_not_interfere() {
    let a = Clock::new();
    let b = Clock::starting_at(0.5);
    let anim = lerp()
        .start(0.0)
        .end(1.0)
        .startt(0.0)
        .endt(1.0)
        .build()
        .unwrap()
        .into_anim()
        .unwrap();
    a.set_time(0.25);
    assert_eq!(anim.get(&a).unwrap(), 0.25);
    assert_eq!(anim.get(&b).unwrap(), 0.5);
}

#[test]
fn anims_as_endpoints() {
    let l1 = lerp().start(1.0).end(2.0).startt(0.0).dt(1.0).build().unwrap();
    let l1 = l1.into_anim().unwrap();
    let l2 = lerp()
        .start(0.0)
        .end(l1)
        .startt(0.0)
        .dt(1.0)
        .build()
        .unwrap()
        .into_anim()
        .unwrap();
    assert_eq!(l2.evaluate(0.0).unwrap(), 0.0);
    assert_eq!(l2.evaluate(0.5).unwrap(), 0.75);
    assert_eq!(l2.evaluate(1.0).unwrap(), 2.0);
}

#[test]
fn constant_and_dynamic_progress_drivers() {
    let clock = Clock::new();
    let fixed = lerp().start(0.0).end(10.0).t(0.5).build().unwrap().into_anim().unwrap();
    assert_eq!(fixed.get(&clock).unwrap(), 5.0);
    clock.add_time(100.0);
    assert_eq!(fixed.get(&clock).unwrap(), 5.0);

    let clock = Clock::new();
    let driver = lerp().start(0.0).end(1.0).dt(2.0).build().unwrap().force(&clock).unwrap();
    let driven = lerp().start(0.0).end(10.0).t(driver).build().unwrap().into_anim().unwrap();
    assert_eq!(driven.get(&clock).unwrap(), 0.0);
    clock.add_time(1.0);
    assert_eq!(driven.get(&clock).unwrap(), 5.0);
    clock.add_time(1.0);
    assert_eq!(driven.get(&clock).unwrap(), 10.0);
}

#[test]
fn incomplete_driver_defaults_to_a_unit_ramp() {
    let clock = Clock::new();
    let driven = lerp()
        .start(0.0)
        .end(10.0)
        .t(lerp().dt(2.0).build().unwrap())
        .build()
        .unwrap()
        .force(&clock)
        .unwrap();
    assert_eq!(driven.get(&clock).unwrap(), 0.0);
    clock.add_time(1.0);
    assert_eq!(driven.get(&clock).unwrap(), 5.0);
    clock.add_time(1.0);
    assert_eq!(driven.get(&clock).unwrap(), 10.0);
}

#[test]
fn easing_builders_pick_curves() {
    let make = |b: lapin_anims_core::InterpolateBuilder| -> Anim {
        b.start(0.0).end(1.0).startt(0.0).endt(1.0).build().unwrap().into_anim().unwrap()
    };
    let quarter = 0.25;
    assert_abs_diff_eq!(
        make(ease_in().method("cubic")).evaluate(quarter).unwrap(),
        Easing::InCubic.apply(quarter)
    );
    assert_abs_diff_eq!(
        make(ease_out().method("bounce")).evaluate(quarter).unwrap(),
        Easing::OutBounce.apply(quarter)
    );
    assert_abs_diff_eq!(
        make(ease().method("circ")).evaluate(quarter).unwrap(),
        Easing::InOutCirc.apply(quarter)
    );
    assert_abs_diff_eq!(
        make(ease_in().method("exponential")).evaluate(quarter).unwrap(),
        Easing::InExponential.apply(quarter)
    );
}

#[test]
fn bad_ranges_and_missing_arguments() {
    let err = lerp().start(0.0).end(1.0).startt(2.0).endt(1.0).build().unwrap_err();
    assert_eq!(err.category(), "argument");

    let clock = Clock::new();
    let pending = lerp().end(1.0).build().unwrap();
    let err = pending.force_with(&Params::new(), &clock).unwrap_err();
    assert_eq!(
        err,
        AnimError::MissingArguments {
            missing: vec!["start", "endt"]
        }
    );
    assert_eq!(
        err.to_string(),
        "unable to complete missing arguments: start, endt"
    );
}

#[test]
fn non_finite_query_times() {
    let anim = lerp()
        .start(10.0)
        .end(100.0)
        .startt(0.0)
        .dt(1.0)
        .build()
        .unwrap()
        .into_anim()
        .unwrap();
    let s = anim.sample(f32::NAN).unwrap();
    assert!(s.value.is_nan());
    assert!(!s.settled);
    assert_eq!(anim.sample(f32::INFINITY).unwrap(), Sample::settled(100.0));
    assert_eq!(anim.evaluate(f32::NEG_INFINITY).unwrap(), 10.0);
}
