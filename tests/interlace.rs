use adam7::{
    extract_pass, extract_passes, merge_pass, merge_passes, merge_row, pass_size, pass_sizes,
    to_full_coordinate, to_pass_coordinate, Deinterlacer, InterlaceError, PassRows, PixelMatrix,
    PASS_COUNT,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_image(rng: &mut impl Rng, width: u32, height: u32) -> PixelMatrix<u32> {
    let pixels = (0..width * height).map(|_| rng.gen()).collect();
    PixelMatrix::from_pixels(width, height, pixels).unwrap()
}

#[test]
fn pixel_count_is_conserved_for_random_sizes() {
    let mut rng = StdRng::seed_from_u64(0x0ada_7000);
    for _ in 0..2000 {
        let width = rng.gen_range(0..5000u64);
        let height = rng.gen_range(0..5000u64);
        let total: u64 = pass_sizes(width as u32, height as u32)
            .iter()
            .map(|&(w, h)| u64::from(w) * u64::from(h))
            .sum();
        assert_eq!(total, width * height, "{}x{}", width, height);
    }
}

#[test]
fn pass_sizes_follow_ceiling_division() {
    for width in 0..70u32 {
        for height in 0..70u32 {
            for pass in 0..PASS_COUNT {
                let t = adam7::multiplier_offset(pass).unwrap();
                let expected_w = (t.x_offset..width).step_by(t.x_multiplier as usize).count();
                let expected_h = (t.y_offset..height).step_by(t.y_multiplier as usize).count();
                assert_eq!(
                    pass_size(pass, width, height).unwrap(),
                    (expected_w as u32, expected_h as u32)
                );
            }
        }
    }
}

#[test]
fn every_coordinate_belongs_to_exactly_one_pass() {
    let (width, height) = (29u32, 23u32);
    let mut hits = vec![0u8; (width * height) as usize];
    for (pass, &(w, h)) in (0..PASS_COUNT).zip(pass_sizes(width, height).iter()) {
        for sy in 0..h {
            for sx in 0..w {
                let (x, y) = to_full_coordinate(pass, sx, sy).unwrap();
                hits[(y * width + x) as usize] += 1;
            }
        }
    }
    assert!(hits.iter().all(|&n| n == 1));

    for y in 0..height {
        for x in 0..width {
            let (pass, sx, sy) = to_pass_coordinate(x, y);
            assert_eq!(to_full_coordinate(pass, sx, sy), Ok((x, y)));
        }
    }
}

#[test]
fn random_images_round_trip() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..64 {
        let width = rng.gen_range(0..40);
        let height = rng.gen_range(0..40);
        let image = random_image(&mut rng, width, height);

        let mut out = PixelMatrix::new(width, height, 0).unwrap();
        for pass in 0..PASS_COUNT {
            let sub = extract_pass(pass, &image).unwrap();
            assert_eq!(sub.dimensions(), pass_size(pass, width, height).unwrap());
            merge_pass(pass, &mut out, &sub).unwrap();
        }
        assert_eq!(out, image);
    }
}

#[test]
fn merge_order_does_not_matter() {
    let mut rng = StdRng::seed_from_u64(42);
    let image = random_image(&mut rng, 21, 17);
    let passes = extract_passes(&image);

    let mut out = PixelMatrix::new(21, 17, 0).unwrap();
    for pass in (0..PASS_COUNT).rev() {
        merge_pass(pass, &mut out, &passes[usize::from(pass)]).unwrap();
    }
    assert_eq!(out, image);
}

#[test]
fn each_merge_writes_only_its_own_pixels() {
    let (width, height) = (16, 16);
    let mut out = PixelMatrix::new(width, height, u8::MAX).unwrap();
    for (pass, &(w, h)) in (0..PASS_COUNT).zip(pass_sizes(width, height).iter()) {
        merge_pass(pass, &mut out, &PixelMatrix::new(w, h, pass).unwrap()).unwrap();
    }
    for y in 0..height {
        for x in 0..width {
            assert_eq!(out[(x, y)], to_pass_coordinate(x, y).0);
        }
    }
}

#[test]
fn streamed_rows_rebuild_the_image() {
    let mut rng = StdRng::seed_from_u64(1234);
    let image = random_image(&mut rng, 37, 11);
    let passes = extract_passes(&image);

    let mut progressive = Deinterlacer::new(37, 11, 0).unwrap();
    let mut plain = PixelMatrix::new(37, 11, 0).unwrap();
    for info in PassRows::new(37, 11) {
        let line = passes[usize::from(info.pass)].row(info.line).unwrap();
        progressive.merge_row(&info, line).unwrap();
        merge_row(&mut plain, &info, line).unwrap();
    }
    assert!(progressive.is_complete());
    assert_eq!(progressive.matrix(), &image);
    assert_eq!(plain, image);
}

#[test]
fn uniform_image_gives_uniform_passes() {
    let image = PixelMatrix::new(8, 8, 0x3c3c_3cffu32).unwrap();
    for pass in 0..PASS_COUNT {
        let sub = extract_pass(pass, &image).unwrap();
        assert_eq!(sub.pixels().len(), (sub.width() * sub.height()) as usize);
        assert!(sub.pixels().iter().all(|&px| px == 0x3c3c_3cff));
    }
}

#[test]
fn mismatched_pass_leaves_image_untouched() {
    let mut rng = StdRng::seed_from_u64(99);
    let image = random_image(&mut rng, 8, 8);
    let mut out = image.clone();

    let wrong = PixelMatrix::new(1, 1, 0).unwrap();
    assert_eq!(
        merge_pass(3, &mut out, &wrong),
        Err(InterlaceError::DimensionMismatch {
            pass: 3,
            expected: (2, 2),
            found: (1, 1)
        })
    );
    assert_eq!(out, image);

    let mut passes = extract_passes(&image);
    passes[0] = PixelMatrix::new(2, 1, 0).unwrap();
    let mut target = PixelMatrix::new(8, 8, 0).unwrap();
    assert!(merge_passes(&mut target, &passes).is_err());
    assert!(target.pixels().iter().all(|&px| px == 0));
}
