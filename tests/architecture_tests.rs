//! Thread-safety of the shared model.
//!
//! The engine is frozen at startup and shared by every request handler.

#[cfg(test)]
mod architecture_tests {
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::thread;

    use fuzzy_risk::risk::model::{BMI, GLUCOSE};
    use fuzzy_risk::{InferenceEngine, RiskAssessor};

    #[test]
    fn test_shared_state_is_thread_safe() {
        fn assert_send_sync<T: Send + Sync>() {}

        assert_send_sync::<InferenceEngine>();
        assert_send_sync::<RiskAssessor>();
        assert_send_sync::<fuzzy_risk::services::RiskServerState>();
    }

    #[test]
    fn test_concurrent_simulations_agree() {
        let assessor = Arc::new(RiskAssessor::builtin().unwrap());
        let inputs = HashMap::from([(GLUCOSE.to_string(), 118.0), (BMI.to_string(), 30.5)]);
        let expected = assessor.engine().simulate(&inputs).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let assessor = Arc::clone(&assessor);
                let inputs = inputs.clone();
                thread::spawn(move || assessor.engine().simulate(&inputs).unwrap())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }
}
