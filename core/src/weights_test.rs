#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashMap;

    use crate::weights::{CommandKind, CommandWeights, WeightTable};

    #[test]
    fn test_default_table_matches_selector_ranges() {
        let table = WeightTable::new(&CommandWeights::default(), false).unwrap();
        assert_eq!(table.total(), 71);
        assert!((table.probability(CommandKind::Insert) - 40.0 / 71.0).abs() < 1e-12);
        assert!((table.probability(CommandKind::Delete) - 10.0 / 71.0).abs() < 1e-12);
        assert!((table.probability(CommandKind::Query) - 20.0 / 71.0).abs() < 1e-12);
        assert!((table.probability(CommandKind::Idle) - 1.0 / 71.0).abs() < 1e-12);
        assert_eq!(table.probability(CommandKind::Save), 0.0);
        assert_eq!(table.probability(CommandKind::Load), 0.0);
    }

    #[test]
    fn test_persistence_adds_save_and_load() {
        let table = WeightTable::new(&CommandWeights::default(), true).unwrap();
        assert_eq!(table.total(), 91);
        assert!(table.probability(CommandKind::Save) > 0.0);
        assert!(table.probability(CommandKind::Load) > 0.0);
    }

    #[test]
    fn test_zero_idle_closes_the_gap() {
        let weights = CommandWeights {
            idle: 0,
            ..Default::default()
        };
        let table = WeightTable::new(&weights, false).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        assert!((0..5_000).all(|_| table.sample(&mut rng) != CommandKind::Idle));
    }

    #[test]
    fn test_all_zero_weights_rejected() {
        let weights = CommandWeights {
            insert: 0,
            delete: 0,
            query: 0,
            idle: 0,
            save: 5,
            load: 5,
        };
        let err = WeightTable::new(&weights, false).unwrap_err();
        assert!(err.to_string().contains("no positive weight"));
        assert!(WeightTable::new(&weights, true).is_ok());
    }

    #[test]
    fn test_sampling_follows_weights() {
        let table = WeightTable::new(&CommandWeights::default(), false).unwrap();
        let mut rng = StdRng::seed_from_u64(0xC0FFEE);
        let draws = 71_000;
        let mut counts: HashMap<CommandKind, usize> = HashMap::new();
        for _ in 0..draws {
            *counts.entry(table.sample(&mut rng)).or_default() += 1;
        }
        let share = |kind| counts.get(&kind).copied().unwrap_or(0) as f64 / draws as f64;
        assert!((share(CommandKind::Insert) - 40.0 / 71.0).abs() < 0.02);
        assert!((share(CommandKind::Delete) - 10.0 / 71.0).abs() < 0.02);
        assert!((share(CommandKind::Query) - 20.0 / 71.0).abs() < 0.02);
        assert!(share(CommandKind::Idle) < 0.03);
    }

    #[test]
    fn test_total_does_not_wrap_at_u32() {
        let weights = CommandWeights {
            insert: u32::MAX,
            query: u32::MAX,
            ..Default::default()
        };
        let table = WeightTable::new(&weights, true).unwrap();
        assert_eq!(table.total(), 2 * u64::from(u32::MAX) + 10 + 1 + 10 + 10);
    }
}
