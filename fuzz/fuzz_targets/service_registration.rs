#![no_main]

use libfuzzer_sys::fuzz_target;
use ferrous_wire::{Container, Lifetime};

// Each 3-byte chunk is one operation: opcode, id selector, value.
fuzz_target!(|data: &[u8]| {
    let container = Container::new();
    let ids = ["a", "b", "c", "d"];
    let mut expected: [Option<(Lifetime, u8)>; 4] = [None; 4];

    for op in data.chunks_exact(3) {
        let slot = (op[1] % 4) as usize;
        let id = ids[slot];
        let value = op[2];

        match op[0] % 4 {
            0 => {
                container.set(id, move |_| Ok(value));
                expected[slot] = Some((Lifetime::Transient, value));
            }
            1 => {
                container.singleton(id, move |_| Ok(value));
                expected[slot] = Some((Lifetime::Singleton, value));
            }
            2 => {
                container.unset(id);
                expected[slot] = None;
            }
            _ => {
                let result = container.get_as::<u8>(id);
                match expected[slot] {
                    Some((_, v)) => assert_eq!(*result.unwrap(), v),
                    None => assert!(result.unwrap_err().is_not_found()),
                }
            }
        }

        assert_eq!(container.has(id), expected[slot].is_some());
    }

    let descriptors = container.descriptors();
    assert_eq!(descriptors.len(), expected.iter().filter(|e| e.is_some()).count());
    for descriptor in descriptors {
        let slot = ids.iter().position(|id| *id == descriptor.id).unwrap();
        assert_eq!(Some(descriptor.lifetime), expected[slot].map(|(l, _)| l));
    }
});
