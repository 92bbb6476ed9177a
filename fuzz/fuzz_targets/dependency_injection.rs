#![no_main]

use libfuzzer_sys::fuzz_target;
use ferrous_wire::{autowire, Container, DiError};
use std::sync::Arc;

pub struct Config {
    value: u32,
    name: String,
}
autowire!(Config { value: u32, name: String });

pub struct DatabaseService {
    config: Arc<Config>,
    pool: Option<u8>,
}
autowire!(DatabaseService { config: Arc<Config>, pool: Option<u8> });

fuzz_target!(|data: &[u8]| {
    if data.len() < 9 {
        return;
    }

    let value = i64::from_le_bytes([data[0], data[1], data[2], data[3], data[4], data[5], data[6], data[7]]);
    let pattern = data[8];
    let name = String::from_utf8_lossy(&data[9..]).into_owned();

    let container = Container::builder().strict_parameters(pattern & 1 == 1).build();
    container.set_parameter("value", value);
    if pattern & 2 == 2 {
        container.set_parameter("name", name.clone());
    }
    if pattern & 4 == 4 {
        container.set_parameter("pool", i64::from(pattern));
    }

    match container.resolve::<DatabaseService>() {
        Ok(db) => {
            assert_eq!(i64::from(db.config.value), value);
            if pattern & 2 == 2 {
                assert_eq!(db.config.name, name);
            }
            assert_eq!(db.pool, (pattern & 4 == 4).then_some(pattern));
        }
        Err(DiError::ParameterMismatch { parameter, .. }) => {
            assert_eq!(parameter, "value");
            assert!(u32::try_from(value).is_err());
        }
        Err(DiError::MissingParameter { parameter, .. }) => {
            assert_eq!(parameter, "name");
            assert!(pattern & 1 == 1 && pattern & 2 == 0);
        }
        Err(err) => panic!("unexpected error: {}", err),
    }
});
