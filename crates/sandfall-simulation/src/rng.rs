//! RNG trait abstraction for the simulation
//!
//! Every random decision in a frame goes through `SimRng`, so a world can be
//! driven by a seeded generator for reproducible runs or by a scripted one in
//! tests. The trait is object safe; reaction handlers receive `&mut dyn SimRng`.

/// Random number generator trait for the simulation
pub trait SimRng {
    /// Generate random boolean with 50% probability
    fn gen_bool(&mut self) -> bool;

    /// Generate random f32 in [0.0, 1.0)
    fn gen_f32(&mut self) -> f32;

    /// Uniform integer in `[low, high)`. Returns `low` for an empty range.
    fn gen_i32_range(&mut self, low: i32, high: i32) -> i32 {
        if high <= low {
            return low;
        }
        let span = (high - low) as f32;
        (low + (self.gen_f32() * span) as i32).min(high - 1)
    }

    /// Check if random value is less than probability threshold
    fn check_probability(&mut self, probability: f32) -> bool {
        self.gen_f32() < probability
    }
}

// Blanket implementation for any type implementing rand::Rng
impl<T: rand::Rng> SimRng for T {
    fn gen_bool(&mut self) -> bool {
        rand::Rng::r#gen(self)
    }

    fn gen_f32(&mut self) -> f32 {
        rand::Rng::r#gen(self)
    }

    fn gen_i32_range(&mut self, low: i32, high: i32) -> i32 {
        if high <= low {
            return low;
        }
        rand::Rng::gen_range(self, low..high)
    }
}
