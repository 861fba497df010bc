//! Step through a control-loop style sequence of in-place operations on a
//! 6x6 matrix, printing every matrix after each step.
//!
//! ```sh
//! cargo run --example firmware_flow
//! ```

use matview::{MatrixView, Status, Workspace};

const ROW: usize = 6;
const COL: usize = 6;

fn report(step: &str, status: Status) {
    let code = match status {
        Ok(()) => "ok".to_string(),
        Err(e) => e.to_string(),
    };
    println!(" ---- {:<36} [{}]", step, code);
}

fn print_all(a: &MatrixView<'_, f32>, b: &MatrixView<'_, f32>, r: &MatrixView<'_, f32>) {
    println!(" [  matrix A  ]");
    print!("{}", a);
    println!(" [  matrix B  ]");
    print!("{}", b);
    println!(" [  matrix R  ]");
    print!("{}", r);
    println!();
}

fn main() {
    #[rustfmt::skip]
    let mut array_a: [f32; ROW * COL] = [
         1.0,  2.0, 53.0,  4.0,  3.0,  4.0,
         5.0, 46.0,  7.0,  8.0,  7.0,  8.0,
         9.0, 10.0, 22.0, 12.0, 22.0, 12.0,
        22.0, 45.0, 12.0, 32.0, 12.0, 32.0,
        34.0, 67.0, 33.0, 32.0, 63.0, 44.0,
        95.0, 46.0, 34.0,  8.0, 67.0,  8.0,
    ];
    let mut array_b = [0.0_f32; ROW * COL];
    let mut array_r = [0.0_f32; ROW * COL];

    let (mut a, mut b, mut r) = match (
        MatrixView::new(&mut array_a, ROW, COL),
        MatrixView::new(&mut array_b, ROW, COL),
        MatrixView::new(&mut array_r, ROW, COL),
    ) {
        (Ok(a), Ok(b), Ok(r)) => (a, b, r),
        _ => {
            eprintln!("could not bind views");
            return;
        }
    };
    let mut ws = Workspace::new();

    println!("{}", a.info());
    println!(" ==== in-place operation walkthrough ====");
    println!();

    report("B = A", b.copy_from(&a));

    let src = a;
    report("A = inv(A), f64", ws.invert_wide(&mut a, &src));

    report("R = A * B", ws.multiply(&mut r, &a, &b));
    print_all(&a, &b, &r);

    report("R = diag(A)", a.diagonal_into(&mut r));
    print_all(&a, &b, &r);

    let src = a;
    report("A = A * 100", ws.multiply_scale(&mut a, &src, 100.0));
    print_all(&a, &b, &r);

    report("B = B'", ws.transpose_in_place(&mut b));
    print_all(&a, &b, &r);

    let lhs = a;
    report("A = A + B", ws.add(&mut a, &lhs, &b));
    print_all(&a, &b, &r);

    let rhs = b;
    report("B = A - B", ws.subtract(&mut b, &a, &rhs));
    print_all(&a, &b, &r);
}
