//! Integration test: full grid-session lifecycle.
//!
//! 1. Build a parameter source the way a host would (JSON metadata)
//! 2. Initialize a session over a sample array in producer scan order
//! 3. Traverse it and check coordinates, values and exhaustion

use grid_common::{GridError, MapSource};
use grid_iterator::{GridIterator, GridSession};

fn spherical_json(ni: usize, nj: usize) -> String {
    format!(
        r#"{{
            "Ni": {ni},
            "Nj": {nj},
            "earthIsOblate": false,
            "radius": 6371229.0,
            "latitudeOfFirstGridPointInDegrees": 46.0,
            "longitudeOfFirstGridPointInDegrees": 2.0,
            "LoVInDegrees": 2.0,
            "LaDInDegrees": 46.0,
            "Latin1InDegrees": 46.0,
            "Latin2InDegrees": 46.0,
            "DxInMetres": 20000.0,
            "DyInMetres": 20000.0,
            "iScansNegatively": false,
            "jScansPositively": true,
            "jPointsAreConsecutive": false,
            "alternativeRowScanning": false
        }}"#
    )
}

#[test]
fn spherical_session_end_to_end() {
    let source = MapSource::from_json(&spherical_json(4, 3)).unwrap();
    let values: Vec<f64> = (0..12).map(|v| v as f64 * 0.5).collect();
    let mut session = GridSession::initialize(&source, values).unwrap();

    // First point reproduces the configured first grid point.
    let first = session.advance().unwrap();
    assert!((first.latitude - 46.0).abs() < 1e-6, "lat {}", first.latitude);
    assert!((first.longitude - 2.0).abs() < 1e-6, "lon {}", first.longitude);
    assert_eq!(first.value, 0.0);

    // Exactly N points total, then idempotent exhaustion.
    let mut yielded = 1;
    let mut last_value = first.value;
    while let Some(sample) = session.advance() {
        assert!((0.0..360.0).contains(&sample.longitude));
        last_value = sample.value;
        yielded += 1;
    }
    assert_eq!(yielded, 12);
    assert_eq!(last_value, 5.5);
    assert!(session.advance().is_none());
    assert_eq!(session.position(), 11);
}

#[test]
fn concurrent_cursors_over_one_session() {
    let source = MapSource::from_json(&spherical_json(3, 3)).unwrap();
    let session = GridSession::initialize(&source, vec![7.0; 9]).unwrap();

    let mut a = session.cursor();
    let mut b = session.cursor();
    for _ in 0..9 {
        let sa = a.advance().unwrap();
        assert_eq!(sa.value, 7.0);
    }
    assert!(!a.has_next());
    // b is unaffected by a's traversal.
    assert!(b.has_next());
    assert_eq!(b.advance().unwrap().value, 7.0);
}

#[test]
fn oblate_session_end_to_end() {
    let mut source = MapSource::from_json(&spherical_json(3, 2)).unwrap();
    source
        .set_flag("earthIsOblate", true)
        .set_double("earthMinorAxisInMetres", 6_356_752.314)
        .set_double("earthMajorAxisInMetres", 6_378_137.0);

    let mut session = GridSession::initialize(&source, vec![1.0; 6]).unwrap();
    let first = session.advance().unwrap();
    assert!((first.latitude - 46.0).abs() < 1e-6, "lat {}", first.latitude);
    assert!((first.longitude - 2.0).abs() < 1e-6, "lon {}", first.longitude);

    // Latitudes increase along +j from the first grid point.
    let lats = session.store().latitudes();
    assert!(lats[3] > lats[0]);
}

#[test]
fn boustrophedon_values_realigned() {
    let mut source = MapSource::from_json(&spherical_json(3, 2)).unwrap();
    source.set_flag("alternativeRowScanning", true);

    // Row 1 stored backwards by the producer.
    let values = vec![0.0, 1.0, 2.0, 5.0, 4.0, 3.0];
    let session = GridSession::initialize(&source, values).unwrap();
    assert_eq!(session.values(), &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
}

#[test]
fn declared_point_count_must_match_shape() {
    let source = MapSource::from_json(&spherical_json(5, 3)).unwrap();
    let err = GridSession::initialize(&source, vec![0.0; 12]).unwrap_err();
    match err {
        GridError::GridShapeMismatch {
            declared,
            columns,
            rows,
        } => {
            assert_eq!((declared, columns, rows), (12, 5, 3));
        }
        other => panic!("expected GridShapeMismatch, got {other:?}"),
    }
}
