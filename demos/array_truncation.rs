//! Array truncation rendering.
//!
//! Shows how `render_value` bounds long arrays: the first `max_array_length`
//! elements, the `...` marker, then the literal final element.
//!
//! Run with: `cargo run --example array_truncation`

use pvlog::{render_value, CapturedValue};

fn main() {
    println!("=== Array Truncation Example ===\n");

    let elements: Vec<String> = (1..=10).map(|n| n.to_string()).collect();
    let value = CapturedValue::new(elements);

    for bound in [0, 2, 5, 9, 10, 12] {
        println!(
            "max_array_length = {:2}  ->  {}",
            bound,
            render_value(&value, bound)
        );
    }

    println!();

    let scalar = CapturedValue::new(vec!["3.1400000".to_string()]);
    println!("scalars ignore the bound ->  {}", render_value(&scalar, 0));
}
