/// Implements `Default` by forwarding to the type's `new()` constructor
///
/// Used for uniffi objects and records whose constructor takes no arguments
#[macro_export]
macro_rules! impl_default_for {
    ($name:ident) => {
        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

#[cfg(test)]
mod tests {
    struct Counter {
        count: u8,
    }

    impl Counter {
        fn new() -> Self {
            Self { count: 1 }
        }
    }

    impl_default_for!(Counter);

    #[test]
    fn default_uses_new() {
        assert_eq!(Counter::default().count, 1);
    }
}
