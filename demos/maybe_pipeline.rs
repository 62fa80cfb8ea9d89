//! Transforming optional values with `lift`.

use idiomata::maybe::{MaybeExt, lift};

fn to_upper(text: String) -> String {
    text.to_uppercase()
}

fn length(text: String) -> usize {
    text.len()
}

const fn is_even(number: usize) -> bool {
    number % 2 == 0
}

fn to_string(flag: bool) -> String {
    String::from(if flag { "true" } else { "false" })
}

fn main() {
    let input1 = Some(String::from("Functional-style Rust"));
    let input2: Option<String> = None;

    println!("{}, {}", input1.show(), input2.show());

    println!(
        "{}, {}",
        lift(to_upper)(input1.clone()).show(),
        lift(to_upper)(input2.clone()).show()
    );

    println!(
        "{}, {}",
        lift(length)(input1.clone()).show(),
        lift(length)(input2.clone()).show()
    );

    let length_is_even = |maybe: Option<String>| lift(is_even)(lift(length)(maybe));
    println!(
        "{}, {}",
        length_is_even(input1.clone()).show(),
        length_is_even(input2.clone()).show()
    );

    let describe = |maybe: Option<String>| lift(to_string)(length_is_even(maybe));
    println!(
        "{}, {}",
        describe(input1.clone()).show(),
        describe(input2.clone()).show()
    );

    for maybe in [&input1, &input2] {
        let output: Vec<bool> = maybe.iter().map(|text| text.len()).map(is_even).collect();
        println!("{} --> {output:?}", maybe.show());
    }

    if let Err(error) = input2.value() {
        println!("{error}");
    }
}
