#![no_main]

use libfuzzer_sys::fuzz_target;
use ferrous_wire::{Container, DiError, Parameter};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // Parsing never panics and prefers the narrowest kind
    match Parameter::parse(text) {
        Parameter::Integer(i) => assert_eq!(text.parse::<i64>().ok(), Some(i)),
        Parameter::String(s) => assert_eq!(s, text),
        _ => {}
    }

    // Arbitrary ids either resolve through a binding or report NotFound
    let container = Container::new();
    container.set_parameter(text, text);
    container.singleton("known", |_| Ok(()));

    assert!(container.get_parameter(text).is_some());
    match container.get(text) {
        Ok(_) => assert!(text == "known" || container.catalog().is_instantiable(text)),
        Err(DiError::NotFound(id)) => assert_eq!(id, text),
        Err(err) => assert!(err.is_container_error()),
    }
});
