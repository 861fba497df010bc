use matview::{MatrixError, MatrixView, Workspace, MAX_DIMENSION};
use proptest::prelude::*;

/// A shape and enough row-major data to fill it.
fn matrix(max: usize) -> impl Strategy<Value = (usize, usize, Vec<f64>)> {
    (1..=max, 1..=max).prop_flat_map(|(r, c)| {
        (
            Just(r),
            Just(c),
            prop::collection::vec(-100.0_f64..100.0, r * c),
        )
    })
}

/// Two matrices of the same shape.
fn matrix_pair(max: usize) -> impl Strategy<Value = (usize, usize, Vec<f64>, Vec<f64>)> {
    (1..=max, 1..=max).prop_flat_map(|(r, c)| {
        (
            Just(r),
            Just(c),
            prop::collection::vec(-100.0_f64..100.0, r * c),
            prop::collection::vec(-100.0_f64..100.0, r * c),
        )
    })
}

/// Square, strictly diagonally dominant, therefore invertible.
fn dominant(max: usize) -> impl Strategy<Value = (usize, Vec<f64>)> {
    (1..=max).prop_flat_map(|n| {
        (Just(n), prop::collection::vec(-1.0_f64..1.0, n * n)).prop_map(|(n, mut v)| {
            for i in 0..n {
                v[i * n + i] = if v[i * n + i] < 0.0 { -(n as f64) - 1.0 } else { n as f64 + 1.0 };
            }
            (n, v)
        })
    })
}

proptest! {
    #[test]
    fn add_then_subtract_recovers((r, c, mut a, mut b) in matrix_pair(MAX_DIMENSION)) {
        let orig = a.clone();
        let mut ws = Workspace::new();
        let mut va = MatrixView::new(&mut a, r, c).unwrap();
        let vb = MatrixView::new(&mut b, r, c).unwrap();
        let lhs = va;
        ws.add(&mut va, &lhs, &vb).unwrap();
        let lhs = va;
        ws.subtract(&mut va, &lhs, &vb).unwrap();
        for (x, y) in va.iter().zip(&orig) {
            prop_assert!((x - y).abs() < 1e-10);
        }
    }

    #[test]
    fn transpose_twice_is_identity((r, c, mut a) in matrix(MAX_DIMENSION)) {
        let orig = a.clone();
        let mut t = vec![0.0; r * c];
        let mut ws = Workspace::new();
        {
            let va = MatrixView::new(&mut a, r, c).unwrap();
            let mut vt = MatrixView::new(&mut t, c, r).unwrap();
            ws.transpose(&mut vt, &va).unwrap();
            for i in 0..r {
                for j in 0..c {
                    prop_assert_eq!(vt.at(j, i), va.at(i, j));
                }
            }
        }
        {
            let mut va = MatrixView::new(&mut a, r, c).unwrap();
            ws.transpose_in_place(&mut va).unwrap();
            prop_assert_eq!(va.shape(), (c, r));
            ws.transpose_in_place(&mut va).unwrap();
            prop_assert_eq!(va.shape(), (r, c));
        }
        prop_assert_eq!(a, orig);
    }

    #[test]
    fn in_place_multiply_matches_separate_dest(
        (n, mut a) in dominant(MAX_DIMENSION),
        seed in prop::collection::vec(-10.0_f64..10.0, MAX_DIMENSION * MAX_DIMENSION),
    ) {
        let mut b = seed[..n * n].to_vec();
        let mut expected = vec![0.0; n * n];
        let mut ws = Workspace::new();

        let mut va = MatrixView::new(&mut a, n, n).unwrap();
        let vb = MatrixView::new(&mut b, n, n).unwrap();
        let mut ve = MatrixView::new(&mut expected, n, n).unwrap();
        ws.multiply(&mut ve, &va, &vb).unwrap();
        ws.multiply_in_place(&mut va, &vb).unwrap();
        prop_assert_eq!(va.iter().collect::<Vec<_>>(), ve.iter().collect::<Vec<_>>());

        // Squaring into one of the operands
        let sq = va;
        ws.multiply(&mut ve, &sq, &sq).unwrap();
        ws.multiply(&mut va, &sq, &sq).unwrap();
        prop_assert_eq!(va.iter().collect::<Vec<_>>(), ve.iter().collect::<Vec<_>>());
    }

    #[test]
    fn set_then_get_element(
        (r, c, mut a) in matrix(MAX_DIMENSION),
        i in 1..=MAX_DIMENSION,
        j in 1..=MAX_DIMENSION,
        value in -1e6_f64..1e6,
    ) {
        let mut va = MatrixView::new(&mut a, r, c).unwrap();
        if i <= r && j <= c {
            va.set_element(i, j, value).unwrap();
            prop_assert_eq!(va.get_element(i, j), Ok(value));
        } else {
            let before = va.iter().collect::<Vec<_>>();
            prop_assert_eq!(va.set_element(i, j, value), Err(MatrixError::LengthError));
            prop_assert_eq!(va.get_element(i, j), Err(MatrixError::LengthError));
            prop_assert_eq!(va.iter().collect::<Vec<_>>(), before);
        }
    }

    #[test]
    fn diagonal_rejects_non_square((r, c, mut a) in matrix(MAX_DIMENSION)) {
        prop_assume!(r != c);
        let orig = a.clone();
        let mut d = vec![7.0; r * c];
        {
            let mut va = MatrixView::new(&mut a, r, c).unwrap();
            let mut vd = MatrixView::new(&mut d, r, c).unwrap();
            prop_assert!(va.set_diagonal(1.0).is_err());
            prop_assert!(va.diagonal_into(&mut vd).is_err());
        }
        prop_assert_eq!(a, orig);
        prop_assert!(d.iter().all(|&x| x == 7.0));
    }

    #[test]
    fn inverse_times_original_is_identity((n, mut a) in dominant(MAX_DIMENSION)) {
        let mut copy = a.clone();
        let mut r = vec![0.0; n * n];
        let mut ws = Workspace::new();

        let mut va = MatrixView::new(&mut a, n, n).unwrap();
        let vc = MatrixView::new(&mut copy, n, n).unwrap();
        let mut vr = MatrixView::new(&mut r, n, n).unwrap();
        ws.invert_in_place(&mut va).unwrap();
        ws.multiply(&mut vr, &va, &vc).unwrap();
        for i in 0..n {
            for j in 0..n {
                let expected = if i == j { 1.0 } else { 0.0 };
                prop_assert!((vr.at(i, j) - expected).abs() < 1e-10);
            }
        }
    }

    #[test]
    fn wide_inverse_of_f32((n, a) in dominant(MAX_DIMENSION)) {
        let mut a32: Vec<f32> = a.iter().map(|&x| x as f32).collect();
        let mut copy = a32.clone();
        let mut r = vec![0.0_f32; n * n];
        let mut ws = Workspace::new();

        let mut va = MatrixView::new(&mut a32, n, n).unwrap();
        let vc = MatrixView::new(&mut copy, n, n).unwrap();
        let mut vr = MatrixView::new(&mut r, n, n).unwrap();
        let src = va;
        ws.invert_wide(&mut va, &src).unwrap();
        ws.multiply(&mut vr, &vc, &va).unwrap();
        for i in 0..n {
            for j in 0..n {
                let expected = if i == j { 1.0 } else { 0.0 };
                prop_assert!((vr.at(i, j) - expected).abs() < 1e-4);
            }
        }
    }
}
