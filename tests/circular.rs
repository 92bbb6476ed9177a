use ferrous_wire::{autowire, Component, Container, DiError, ErrorKind};
use std::sync::Arc;

#[derive(Debug)]
pub struct Left {
    pub right: Arc<Right>,
}
autowire!(Left { right: Arc<Right> });

#[derive(Debug)]
pub struct Right {
    pub left: Arc<Left>,
}
autowire!(Right { left: Arc<Left> });

#[derive(Debug)]
pub struct Selfish {
    pub me: Arc<Selfish>,
}
autowire!(Selfish { me: Arc<Selfish> });

#[derive(Debug)]
pub struct Leaf;
autowire!(Leaf {});

#[derive(Debug)]
pub struct Diamond {
    pub first: Arc<Leaf>,
    pub second: Arc<Leaf>,
}
autowire!(Diamond { first: Arc<Leaf>, second: Arc<Leaf> });

#[test]
fn test_self_circular_factory() {
    let container = Container::new();
    container.set("self", |c| {
        c.get("self")?;
        Ok(())
    });

    match container.get("self") {
        Err(DiError::Circular(path)) => assert_eq!(path, vec!["self", "self"]),
        other => panic!("Expected Circular error, got {:?}", other),
    }
}

#[test]
fn test_three_level_circular_factories() {
    let container = Container::new();
    container.set("a", |c| c.get("b").map(|_| ()));
    container.set("b", |c| c.get("c").map(|_| ()));
    container.set("c", |c| c.get("a").map(|_| ()));

    let err = container.get("a").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Container);
    assert_eq!(err.to_string(), "Circular dependency: a -> b -> c -> a");

    // Entering from the middle reports the cycle from there
    match container.get("b") {
        Err(DiError::Circular(path)) => assert_eq!(path, vec!["b", "c", "a", "b"]),
        other => panic!("Expected Circular error, got {:?}", other),
    }
}

#[test]
fn test_autowired_cycle() {
    let container = Container::new();

    match container.resolve::<Left>() {
        Err(DiError::Circular(path)) => {
            assert_eq!(path, vec![Left::ID, Right::ID, Left::ID]);
        }
        other => panic!("Expected Circular error, got {:?}", other.map(|_| ())),
    }

    match container.resolve::<Selfish>() {
        Err(DiError::Circular(path)) => assert_eq!(path, vec![Selfish::ID, Selfish::ID]),
        other => panic!("Expected Circular error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_cycle_broken_by_binding() {
    pub struct Stub;

    let container = Container::new();
    // A binding for Right that does not need Left breaks the cycle
    container.set(Right::ID, |_| Ok(Stub));

    // Right resolves to a Stub, which cannot be used as Arc<Right>
    let err = container.resolve::<Left>().unwrap_err();
    assert!(matches!(err, DiError::TypeMismatch { .. }));
}

#[test]
fn test_shared_dependency_is_not_a_cycle() {
    let container = Container::new();
    let diamond = container.resolve::<Diamond>().unwrap();
    assert!(!Arc::ptr_eq(&diamond.first, &diamond.second));
}

#[test]
fn test_stack_is_clean_after_failure() {
    let container = Container::new();
    container.set("a", |c| c.get("b").map(|_| ()));
    container.set("b", |c| c.get("a").map(|_| ()));
    assert!(container.get("a").is_err());

    // Rebinding b without the back edge works on the same thread
    container.set("b", |_| Ok(()));
    assert!(container.get("a").is_ok());
}

#[test]
fn test_independent_containers_do_not_collide() {
    let outer = Container::new();
    outer.set("service", |_| {
        // The same id in another container is not a cycle
        let inner = Container::new();
        inner.set("service", |_| Ok(1u8));
        inner.get_as::<u8>("service").map(|v| *v)
    });

    assert_eq!(*outer.get_as::<u8>("service").unwrap(), 1);
}

#[test]
fn test_depth_limit() {
    let container = Container::builder().max_depth(8).build();
    for level in 0..16 {
        let next = format!("level{}", level + 1);
        container.set(format!("level{}", level), move |c| c.get(&next).map(|_| ()));
    }
    container.set("level16", |_| Ok(()));

    assert!(matches!(container.get("level0"), Err(DiError::DepthExceeded(8))));
    assert!(container.get("level10").is_ok());
}

fn chain(container: &Container, depth: usize) {
    for level in 0..depth {
        let next = format!("level{}", level + 1);
        container.set(format!("level{}", level), move |c| c.get(&next).map(|_| ()));
    }
    container.set(format!("level{}", depth), |_| Ok(()));
}

#[test]
fn test_default_depth_limit_errors_before_stack_overflow() {
    let container = Container::new();
    let limit = container.max_depth();
    assert_eq!(limit, 256);

    // Runs on the default test thread stack
    chain(&container, limit + 64);

    let err = container.get("level0").unwrap_err();
    assert!(matches!(err, DiError::DepthExceeded(depth) if depth == limit));
    assert_eq!(err.kind(), ErrorKind::Container);

    // A chain exactly at the limit resolves
    let shallow = Container::new();
    chain(&shallow, limit - 1);
    assert!(shallow.get("level0").is_ok());
}
