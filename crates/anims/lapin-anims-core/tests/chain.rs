use approx::assert_abs_diff_eq;
use lapin_anims_core::{
    bezier3, chain, chain_components, lerp, AnimSlot, AttrValue, Clock, Completion, SlotLayout,
    SlotSet,
};

fn seg(start: f32, end: f32, startt: f32, endt: f32) -> Completion {
    lerp().start(start).end(end).startt(startt).endt(endt).build().unwrap()
}

#[test]
fn verbose_chain() {
    let c = chain([seg(0.0, 10.0, 0.0, 1.0), seg(10.0, 30.0, 1.0, 2.0)])
        .unwrap()
        .into_anim()
        .unwrap();
    for (t, v) in [(0.0, 0.0), (0.5, 5.0), (1.0, 10.0), (1.5, 20.0), (2.0, 30.0), (3.0, 30.0)] {
        assert_eq!(c.evaluate(t).unwrap(), v, "t={t}");
    }
}

#[test]
fn boundaries_are_continuous() {
    let c = chain([
        lerp().start(0.0).end(4.0).startt(0.0).dt(1.0).build().unwrap(),
        lerp().end(-2.0).dt(2.0).build().unwrap(),
        lerp().end(7.0).dt(0.5).build().unwrap(),
    ])
    .unwrap()
    .into_anim()
    .unwrap();
    let chain_node = c.as_chain().unwrap();
    let segments = chain_node.segments();
    for pair in segments.windows(2) {
        let next_start = pair[1].anim.as_interpolate().unwrap().start().evaluate(0.0).unwrap();
        assert_eq!(pair[0].endt, pair[1].startt);
        assert_abs_diff_eq!(c.evaluate(pair[0].endt).unwrap(), next_start);
    }
    assert_eq!(segments[2].endt, 3.5);
}

#[test]
fn incomplete_chain_completes_on_assignment() {
    let layout = SlotLayout::builder("Test").slot("x").build().unwrap();
    let clock = Clock::new();
    let t = SlotSet::new(layout, &clock);
    t.set("x", 100.0).unwrap();

    let c = chain([
        lerp().end(10.0).dt(1.0).build().unwrap(),
        lerp().end(30.0).dt(1.0).build().unwrap(),
    ])
    .unwrap();
    assert!(!c.is_complete());

    clock.set_time(10.0);
    t.set("x", c).unwrap();
    let expected = [
        (10.0, 100.0),
        (10.5, 55.0),
        (11.0, 10.0),
        (11.5, 20.0),
        (12.0, 30.0),
        (13.0, 30.0),
    ];
    for (time, v) in expected {
        clock.set_time(time);
        assert_eq!(t.get("x").unwrap(), v, "t={time}");
    }
    assert!(!t.slot_named("x").unwrap().is_dynamic());
}

fn xy_layout() -> std::sync::Arc<SlotLayout> {
    SlotLayout::builder("Test")
        .slot("x")
        .slot("y")
        .swizzle("xy", &["x", "y"])
        .build()
        .unwrap()
}

#[test]
fn component_chain_moves_in_a_square() {
    let clock = Clock::new();
    let t = SlotSet::new(xy_layout(), &clock);
    let now = 0.0;
    let leg = |from: [f32; 2], to: [f32; 2], startt: f32| {
        lerp()
            .start_components(from)
            .end_components(to)
            .startt(startt)
            .endt(startt + 10.0)
            .build_components()
            .unwrap()
    };
    let xy = chain_components(vec![
        leg([0.0, 0.0], [10.0, 0.0], now),
        leg([10.0, 0.0], [10.0, 10.0], now + 10.0),
        leg([10.0, 10.0], [0.0, 10.0], now + 20.0),
        leg([0.0, 10.0], [0.0, 0.0], now + 30.0),
    ])
    .unwrap();
    t.set("xy", xy).unwrap();

    assert_eq!(t.get_array::<2>("xy").unwrap(), [0.0, 0.0]);
    clock.set_time(15.0);
    let [x, y] = t.get_array::<2>("xy").unwrap();
    assert_abs_diff_eq!(x, 10.0, epsilon = 1e-5);
    assert_abs_diff_eq!(y, 5.0, epsilon = 1e-5);
    clock.set_time(35.0);
    let [x, y] = t.get_array::<2>("xy").unwrap();
    assert_abs_diff_eq!(x, 0.0, epsilon = 1e-5);
    assert_abs_diff_eq!(y, 5.0, epsilon = 1e-5);
}

#[test]
fn incomplete_component_chain_starts_from_current_values() {
    let clock = Clock::new();
    let t = SlotSet::new(xy_layout(), &clock);
    let leg = |to: [f32; 2]| {
        lerp()
            .end_components(to)
            .dt(10.0)
            .build_components()
            .unwrap()
    };
    let xy = chain_components(vec![
        leg([10.0, 0.0]),
        leg([10.0, 10.0]),
        leg([0.0, 10.0]),
        leg([0.0, 0.0]),
    ])
    .unwrap();
    t.set("xy", AttrValue::from(xy)).unwrap();

    assert_eq!(t.get_array::<2>("xy").unwrap(), [0.0, 0.0]);
    clock.set_time(15.0);
    let [x, y] = t.get_array::<2>("xy").unwrap();
    assert_abs_diff_eq!(x, 10.0, epsilon = 1e-5);
    assert_abs_diff_eq!(y, 5.0, epsilon = 1e-5);
    clock.set_time(35.0);
    let [x, y] = t.get_array::<2>("xy").unwrap();
    assert_abs_diff_eq!(x, 0.0, epsilon = 1e-5);
    assert_abs_diff_eq!(y, 5.0, epsilon = 1e-5);
}

#[test]
fn bezier_segment_seeds_the_next_lerp() {
    let clock = Clock::new();
    let curve = bezier3(0.0, 2.0, 8.0, 10.0)
        .startt(0.0)
        .dt(1.0)
        .build(&clock)
        .unwrap();
    let c = chain([Completion::from(curve), lerp().end(20.0).dt(1.0).build().unwrap()])
        .unwrap()
        .into_anim()
        .unwrap();
    assert_eq!(c.evaluate(1.5).unwrap(), 15.0);
    assert_eq!(c.evaluate(5.0).unwrap(), 20.0);
}

#[test]
fn non_finite_times_pick_an_end() {
    let c = chain([seg(0.0, 10.0, 0.0, 1.0), seg(10.0, 30.0, 1.0, 2.0)])
        .unwrap()
        .into_anim()
        .unwrap();
    let s = c.sample(f32::NAN).unwrap();
    assert!(s.value.is_nan());
    assert!(!s.settled);
    assert_eq!(c.evaluate(f32::NEG_INFINITY).unwrap(), 0.0);
    assert_eq!(c.evaluate(f32::INFINITY).unwrap(), 30.0);
}

#[test]
fn slot_keeps_its_chain_through_a_nan_clock() {
    let clock = Clock::new();
    let slot = AnimSlot::new();
    let c = chain([seg(0.0, 10.0, 0.0, 1.0), seg(10.0, 30.0, 1.0, 2.0)]).unwrap();
    slot.assign(c, &clock).unwrap();

    clock.set_time(f32::NAN);
    assert!(slot.read(clock.get_time()).unwrap().is_nan());
    assert!(slot.is_dynamic());

    clock.set_time(1.5);
    assert_eq!(slot.read(clock.get_time()).unwrap(), 20.0);
}
