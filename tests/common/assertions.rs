//! Custom assertion macros
//!
//! Shorter, more descriptive failures for the checks the suite repeats.

/// Assert that a result is ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
    ($result:expr, $message:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("{}: {:?}", $message, e),
        }
    };
}

/// Assert that a guard decision redirects to the given route
#[macro_export]
macro_rules! assert_redirect {
    ($decision:expr, $route:expr) => {
        match $decision {
            bookworm::client::GuardDecision::Redirect(to) => assert_eq!(to, $route),
            other => panic!("Expected redirect to {}, got {:?}", $route, other),
        }
    };
}

/// Assert that a library holds exactly one entry for `book_id` and return it
#[macro_export]
macro_rules! assert_single_entry {
    ($entries:expr, $book_id:expr) => {{
        let matching: Vec<_> = $entries.iter().filter(|e| e.book_id() == $book_id).collect();
        assert_eq!(
            matching.len(),
            1,
            "Expected exactly one entry for {}, found {:?}",
            $book_id,
            matching
        );
        matching[0].clone()
    }};
}
