/// LSD radix sort on u32 keys for SoA buffers (inds/vals).
/// - Sorts by inds ascending
/// - Reorders vals accordingly
/// - Stable
///
/// Complexity: 4 passes, each O(n + 256)
pub fn radix_sort_u32_soa<N: Copy>(inds: &mut [u32], vals: &mut [N]) {
    assert_eq!(inds.len(), vals.len());
    let n = inds.len();
    if n <= 1 {
        return;
    }

    // Small sizes: insertion sort beats allocating scratch
    if n <= 32 {
        insertion_sort_u32_soa(inds, vals);
        return;
    }

    let mut inds_tmp = inds.to_vec();
    let mut vals_tmp = vals.to_vec();

    // even pass count, so the result ends up back in the caller's buffers
    for (pass, shift) in [0u32, 8, 16, 24].into_iter().enumerate() {
        if pass % 2 == 0 {
            scatter_pass(inds, vals, &mut inds_tmp, &mut vals_tmp, shift);
        } else {
            scatter_pass(&inds_tmp, &vals_tmp, inds, vals, shift);
        }
    }
}

/// One stable counting pass on the byte at `shift`
fn scatter_pass<N: Copy>(src_inds: &[u32], src_vals: &[N], dst_inds: &mut [u32], dst_vals: &mut [N], shift: u32) {
    let mut count = [0usize; 256];
    for &k in src_inds {
        count[((k >> shift) & 0xFF) as usize] += 1;
    }
    let mut sum = 0usize;
    for c in count.iter_mut() {
        let tmp = *c;
        *c = sum;
        sum += tmp;
    }
    for (&k, &v) in src_inds.iter().zip(src_vals) {
        let b = ((k >> shift) & 0xFF) as usize;
        dst_inds[count[b]] = k;
        dst_vals[count[b]] = v;
        count[b] += 1;
    }
}

fn insertion_sort_u32_soa<N: Copy>(inds: &mut [u32], vals: &mut [N]) {
    for i in 1..inds.len() {
        let mut j = i;
        while j > 0 && inds[j] < inds[j - 1] {
            inds.swap(j, j - 1);
            vals.swap(j, j - 1);
            j -= 1;
        }
    }
}
