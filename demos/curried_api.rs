//! Building a three-argument call one piece at a time.

use idiomata::curry::{Application, Curried, CurryError};

fn api(arguments: Vec<i32>) -> bool {
    println!("{}, {}, {}", arguments[0], arguments[1], arguments[2]);
    true
}

fn finish(application: Application<i32, bool, fn(Vec<i32>) -> bool>) {
    match application {
        Application::Complete(result) => println!("-> {result}"),
        Application::Partial(partial) => println!("-> still missing {}", partial.remaining()),
    }
}

fn main() -> Result<(), CurryError> {
    let api_curried = Curried::new(3, api as fn(Vec<i32>) -> bool)?;

    finish(api_curried.apply([17, 42, 56])?);

    let request1 = api_curried.apply_one(17)?;
    finish(request1);

    if let Some(request1) = api_curried.apply_one(17)?.partial() {
        let request2 = request1.apply_one(42)?;
        finish(request1.apply([42, 56])?);
        if let Some(request2) = request2.partial() {
            finish(request2.apply_one(56)?);
        }
    }

    if let Err(error) = api_curried.apply([1, 2, 3, 4]) {
        println!("{error}");
    }

    Ok(())
}
