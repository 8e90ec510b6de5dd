use alloc::vec::Vec;

use zeroize::Zeroizing;

use crate::crypto::hash::Hash;

/// Key material derived with [`derive_key`] for encryption keys.
pub const ID_KEY: u8 = 1;
/// Key material derived with [`derive_key`] for initialisation vectors.
pub const ID_IV: u8 = 2;
/// Key material derived with [`derive_key`] for integrity (MAC) keys.
pub const ID_MAC: u8 = 3;

/// Derive `len` bytes of key material from a password, as described in
/// appendix B.2 of RFC 7292.
///
/// `password` is the BMPString form produced by [`bmp_password`].  `id` is
/// one of [`ID_KEY`], [`ID_IV`] and [`ID_MAC`].  An `iterations` of zero is
/// treated as one.
pub fn derive_key(
    hash: &dyn Hash,
    id: u8,
    password: &[u8],
    salt: &[u8],
    iterations: u64,
    len: usize,
) -> Zeroizing<Vec<u8>> {
    let v = hash.algorithm().block_len();
    let u = hash.output_len();

    let diversifier = alloc::vec![id; v];
    let mut input = Zeroizing::new(Vec::new());
    extend_to_block(&mut input, salt, v);
    extend_to_block(&mut input, password, v);

    let mut out = Zeroizing::new(Vec::with_capacity(len));
    loop {
        let mut ctx = hash.start();
        ctx.update(&diversifier);
        ctx.update(&input);
        let mut a = ctx.finish();
        for _ in 1..iterations {
            a = hash.hash(a.as_ref());
        }

        let take = u.min(len - out.len());
        out.extend_from_slice(&a.as_ref()[..take]);
        if out.len() == len {
            return out;
        }

        // I_j = (I_j + B + 1) mod 2^(8v), where B is A repeated to v bytes
        let b = Zeroizing::new(
            a.as_ref()
                .iter()
                .cycle()
                .take(v)
                .copied()
                .collect::<Vec<u8>>(),
        );
        for block in input.chunks_mut(v) {
            let mut carry = 1u16;
            for (x, y) in block.iter_mut().zip(b.iter()).rev() {
                let sum = u16::from(*x) + u16::from(*y) + carry;
                *x = sum as u8;
                carry = sum >> 8;
            }
        }
    }
}

/// Append `data` repeated to fill a whole number of `v`-byte blocks.
fn extend_to_block(out: &mut Vec<u8>, data: &[u8], v: usize) {
    let len = data.len().div_ceil(v) * v;
    out.extend(data.iter().cycle().take(len));
}

/// Encode a password as the KDF expects: UTF-16BE with a trailing NUL.
///
/// The empty password is two zero bytes, as most implementations have it.
pub fn bmp_password(password: &str) -> Zeroizing<Vec<u8>> {
    let mut out = Zeroizing::new(Vec::with_capacity(2 * password.len() + 2));
    for unit in password.encode_utf16() {
        out.extend_from_slice(&unit.to_be_bytes());
    }
    out.extend_from_slice(&[0, 0]);
    out
}
