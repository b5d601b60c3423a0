/// Execute an aggregate command deterministically (no IO).
///
/// This is the canonical lifecycle for every aggregate in the workspace:
///
/// 1. **Decide**: calls `aggregate.handle(command)` to get events (pure, no mutation)
/// 2. **Evolve**: applies each event to the aggregate via `aggregate.apply(event)`
///
/// If `handle` rejects the command, the aggregate is left untouched. The
/// applied events are returned so the caller can forward them to a sink.
pub fn execute<A>(aggregate: &mut A, command: &A::Command) -> Result<Vec<A::Event>, A::Error>
where
    A: stockroom_core::Aggregate,
{
    let events = A::handle(aggregate, command)?;
    for ev in &events {
        A::apply(aggregate, ev);
    }
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_core::{Aggregate, AggregateRoot};

    #[derive(Debug, Clone, PartialEq)]
    struct Counter {
        value: i64,
        version: u64,
    }

    impl AggregateRoot for Counter {
        type Id = u8;

        fn id(&self) -> &u8 {
            &0
        }

        fn version(&self) -> u64 {
            self.version
        }
    }

    impl Aggregate for Counter {
        type Command = i64;
        type Event = i64;
        type Error = String;

        fn apply(&mut self, event: &i64) {
            self.value += event;
            self.version += 1;
        }

        fn handle(&self, command: &i64) -> Result<Vec<i64>, String> {
            if *command == 0 {
                return Err("zero".into());
            }
            Ok(vec![*command, *command])
        }
    }

    #[test]
    fn applies_every_decided_event() {
        let mut counter = Counter { value: 0, version: 0 };
        let events = execute(&mut counter, &3).unwrap();
        assert_eq!(events, vec![3, 3]);
        assert_eq!(counter.value, 6);
        assert_eq!(counter.version(), 2);
    }

    #[test]
    fn rejected_command_leaves_state_untouched() {
        let mut counter = Counter { value: 5, version: 1 };
        let before = counter.clone();
        assert!(execute(&mut counter, &0).is_err());
        assert_eq!(counter, before);
    }
}
