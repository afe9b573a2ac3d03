//! Prints one interpolation under each extend mode, sampled past both ends.
//!
//! Run with `RUST_LOG=debug cargo run --example extend_modes` to see slot detach logs.

use anyhow::Result;
use lapin_anims_core::{lerp, AnimSlot, Clock, ExtendMode};

fn main() -> Result<()> {
    env_logger::init();

    let clock = Clock::new();
    let modes = [
        ExtendMode::Constant,
        ExtendMode::Extrapolate,
        ExtendMode::Repeat,
        ExtendMode::Reverse,
    ];
    let slots = modes
        .iter()
        .map(|&extend| {
            let slot = AnimSlot::new();
            let anim = lerp()
                .start(0.0)
                .end(1.0)
                .startt(10.0)
                .endt(20.0)
                .extend(extend)
                .build()?;
            slot.assign(anim, &clock)?;
            Ok(slot)
        })
        .collect::<Result<Vec<_>>>()?;

    print!("{:>6}", "t");
    for mode in modes {
        print!("{:>13}", mode.name());
    }
    println!();

    for step in 0..=15 {
        let t = step as f32 * 2.0;
        clock.set_time(t);
        print!("{t:>6.1}");
        for slot in &slots {
            print!("{:>13.3}", slot.read(clock.get_time())?);
        }
        println!();
    }
    Ok(())
}
