use rand::{thread_rng, Rng};
use simplelog::{Config, LevelFilter, SimpleLogger};
use splay_collections::splay_tree::{SplayMap, SplaySet};
use std::collections::{BTreeMap, BTreeSet};

const NUM_OF_OPERATIONS: usize = 20_000;
const KEY_RANGE: u32 = 1_000;

fn init_logger() {
    // several tests race to install the global logger
    let _ = SimpleLogger::init(LevelFilter::Trace, Config::default());
}

#[test]
fn int_test_logger_shows_rotations() {
    init_logger();
    assert!(log::log_enabled!(
        target: "splay_collections::splay_tree::rotation",
        log::Level::Trace
    ));
    assert!(log::log_enabled!(
        target: "splay_collections::splay_tree::tree",
        log::Level::Debug
    ));

    let mut set = SplaySet::new();
    for key in 0..8u32 {
        set.insert(key);
    }
    assert!(set.contains(&0));
}

#[test]
fn int_test_splay_map() {
    init_logger();
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut map = SplayMap::new();
    let mut expected = BTreeMap::new();

    for i in 0..NUM_OF_OPERATIONS {
        let key = rng.gen_range(0, KEY_RANGE);
        match rng.gen_range(0, 3) {
            0 => {
                let val = rng.gen::<u32>();
                let old_entry = map.insert(key, val);
                assert_eq!(old_entry, expected.insert(key, val).map(|old_val| (key, old_val)));
                assert_eq!(map.root(), Some((&key, &val)));
            },
            1 => {
                let len = map.len();
                let old_entry = map.remove(&key);
                assert_eq!(old_entry, expected.remove(&key).map(|old_val| (key, old_val)));
                assert!(!map.contains_key(&key));
                match old_entry {
                    Some(_) => assert_eq!(map.len(), len - 1),
                    None => assert_eq!(map.len(), len),
                }
            },
            _ => {
                let found = map.contains_key(&key);
                assert_eq!(found, expected.contains_key(&key));
                if found {
                    assert_eq!(map.root().map(|pair| *pair.0), Some(key));
                }
            },
        }

        assert_eq!(map.len(), expected.len());
        if i % 1_000 == 0 {
            assert_eq!(map.validate(), Ok(()));
        }
    }

    assert_eq!(map.validate(), Ok(()));
    assert_eq!(
        map.iter().collect::<Vec<(&u32, &u32)>>(),
        expected.iter().collect::<Vec<(&u32, &u32)>>(),
    );
    assert_eq!(map.min(), expected.keys().next());
    assert_eq!(map.max(), expected.keys().next_back());
}

#[test]
fn int_test_splay_map_drain() {
    init_logger();
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut map = SplayMap::new();
    let mut expected = Vec::new();

    for _ in 0..NUM_OF_OPERATIONS {
        let key = rng.gen::<u32>();
        let val = rng.gen::<u32>();

        map.insert(key, val);
        expected.push((key, val));
    }

    expected.reverse();
    expected.sort_by(|l, r| l.0.cmp(&r.0));
    expected.dedup_by_key(|pair| pair.0);

    assert_eq!(map.len(), expected.len());
    for entry in &expected {
        assert_eq!(map.get(&entry.0), Some(&entry.1));
        assert_eq!(map.root(), Some((&entry.0, &entry.1)));
    }

    thread_rng().shuffle(&mut expected);

    let mut expected_len = expected.len();
    for entry in expected {
        let old_entry = map.remove(&entry.0);
        expected_len -= 1;
        assert_eq!(old_entry, Some((entry.0, entry.1)));
        assert_eq!(map.len(), expected_len);
    }
    assert!(map.is_empty());
    assert_eq!(map.validate(), Ok(()));
}

#[test]
fn int_test_splay_set() {
    init_logger();
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut set = SplaySet::new();
    let mut expected = BTreeSet::new();

    for _ in 0..NUM_OF_OPERATIONS {
        let key = rng.gen_range(0, KEY_RANGE);
        if rng.gen() {
            set.insert(key);
            expected.insert(key);
            assert_eq!(set.root(), Some(&key));
        } else {
            assert_eq!(set.remove(&key).is_some(), expected.remove(&key));
        }
    }

    assert_eq!(set.validate(), Ok(()));
    assert_eq!(
        set.into_iter().collect::<Vec<u32>>(),
        expected.into_iter().collect::<Vec<u32>>(),
    );
}

#[test]
fn int_test_repeated_miss() {
    init_logger();
    let mut set = (0..100u32).map(|key| key * 2).collect::<SplaySet<u32>>();
    for key in (0..100u32).map(|key| key * 2 + 1) {
        assert!(!set.contains(&key));
        assert!(!set.contains(&key));
        assert_eq!(set.len(), 100);
    }
    assert_eq!(set.validate(), Ok(()));
    assert_eq!(
        set.iter().cloned().collect::<Vec<u32>>(),
        (0..100).map(|key| key * 2).collect::<Vec<u32>>(),
    );
}

#[test]
fn int_test_sequential_access() {
    init_logger();
    let n: u32 = 1_024;
    let mut set = SplaySet::new();
    for key in 0..n {
        set.insert(key);
    }
    // ascending inserts leave a left chain under the maximum
    assert_eq!(set.height(), n as usize);

    // splaying the deepest key roughly halves the depth of the path it walked
    assert!(set.contains(&0));
    assert!(set.height() <= n as usize / 2 + 2);

    for key in 0..n {
        assert!(set.contains(&key));
        assert_eq!(set.root(), Some(&key));
    }
    assert_eq!(set.validate(), Ok(()));
}
