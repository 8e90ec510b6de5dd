//! Elliptic curves, points and EC keys.

use alloc::boxed::Box;
use alloc::format;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use num_bigint::BigUint;
use pki_types::PrivateSec1KeyDer;
use zeroize::Zeroizing;

use crate::crypto::CryptoProvider;
use crate::der::{Reader, Tag, Writer};
use crate::error::{EncodingError, Error};
use crate::log::trace;
use crate::oid;

/// The curves certkit knows by name.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NamedCurve {
    Secp256r1,
    Secp384r1,
    Secp521r1,
    Secp256k1,
}

impl NamedCurve {
    /// Every curve in the table.
    pub const ALL: [Self; 4] = [
        Self::Secp256r1,
        Self::Secp384r1,
        Self::Secp521r1,
        Self::Secp256k1,
    ];

    /// The curve's object identifier.
    pub fn oid(self) -> &'static [u8] {
        match self {
            Self::Secp256r1 => oid::SECP256R1,
            Self::Secp384r1 => oid::SECP384R1,
            Self::Secp521r1 => oid::SECP521R1,
            Self::Secp256k1 => oid::SECP256K1,
        }
    }

    /// Look up a curve by object identifier.
    pub fn from_oid(oid: &[u8]) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.oid() == oid)
    }

    /// Bytes needed to hold a field element or scalar.
    pub fn field_len(self) -> usize {
        match self {
            Self::Secp256r1 | Self::Secp256k1 => 32,
            Self::Secp384r1 => 48,
            Self::Secp521r1 => 66,
        }
    }

    /// The SEC 2 name of the curve.
    pub fn name(self) -> &'static str {
        match self {
            Self::Secp256r1 => "secp256r1",
            Self::Secp384r1 => "secp384r1",
            Self::Secp521r1 => "secp521r1",
            Self::Secp256k1 => "secp256k1",
        }
    }

    /// The curve's domain parameters.
    pub fn parameters(self) -> CurveParameters {
        let c = match self {
            Self::Secp256r1 => &P256,
            Self::Secp384r1 => &P384,
            Self::Secp521r1 => &P521,
            Self::Secp256k1 => &K256,
        };

        CurveParameters {
            p: BigUint::from_bytes_be(c.p),
            a: BigUint::from_bytes_be(c.a),
            b: BigUint::from_bytes_be(c.b),
            generator: EcPoint::Affine {
                x: BigUint::from_bytes_be(c.gx),
                y: BigUint::from_bytes_be(c.gy),
            },
            order: BigUint::from_bytes_be(c.n),
            cofactor: Some(BigUint::from(1u8)),
        }
    }
}

impl fmt::Display for NamedCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NamedCurve {
    type Err = Error;

    /// Accepts SEC 2, ANSI X9.62 and NIST names, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const NAMES: &[(&str, NamedCurve)] = &[
            ("secp256r1", NamedCurve::Secp256r1),
            ("prime256v1", NamedCurve::Secp256r1),
            ("P-256", NamedCurve::Secp256r1),
            ("secp384r1", NamedCurve::Secp384r1),
            ("P-384", NamedCurve::Secp384r1),
            ("secp521r1", NamedCurve::Secp521r1),
            ("P-521", NamedCurve::Secp521r1),
            ("secp256k1", NamedCurve::Secp256k1),
        ];

        NAMES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(s))
            .map(|(_, curve)| *curve)
            .ok_or_else(|| Error::UnknownName(s.into()))
    }
}

/// Weierstrass domain parameters over a prime field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurveParameters {
    /// The field prime
    pub p: BigUint,
    /// Coefficient `a` of `y² = x³ + ax + b`
    pub a: BigUint,
    /// Coefficient `b` of `y² = x³ + ax + b`
    pub b: BigUint,
    /// The base point
    pub generator: EcPoint,
    /// The order of the base point
    pub order: BigUint,
    /// The cofactor, when the encoding includes it
    pub cofactor: Option<BigUint>,
}

impl CurveParameters {
    /// Bytes needed to hold a field element.
    pub fn field_len(&self) -> usize {
        (self.p.bits() as usize).div_ceil(8)
    }

    /// The named curve with these parameters, if there is one.
    pub fn named(&self) -> Option<NamedCurve> {
        NamedCurve::ALL.into_iter().find(|curve| {
            let known = curve.parameters();
            known.p == self.p
                && known.a == self.a
                && known.b == self.b
                && known.generator == self.generator
                && known.order == self.order
                && self
                    .cofactor
                    .as_ref()
                    .map_or(true, |h| Some(h) == known.cofactor.as_ref())
        })
    }

    /// Reads a `SpecifiedECDomain`.
    fn read(rd: &mut Reader<'_>) -> Result<Self, Error> {
        let mut domain = rd.read_sequence()?;
        if !(1..=3).contains(&domain.read_small_integer()?) {
            return Err(EncodingError::UnsupportedVersion("EC parameters").into());
        }

        let mut field = domain.read_sequence()?;
        let field_type = field.read_oid()?;
        if field_type != oid::PRIME_FIELD {
            return Err(Error::UnsupportedCurve(format!(
                "field type {}",
                oid::to_dotted(field_type)
            )));
        }
        let p = field.read_unsigned()?;
        field.expect_empty("field ID")?;

        let mut curve = domain.read_sequence()?;
        let a = BigUint::from_bytes_be(curve.read_octet_string()?);
        let b = BigUint::from_bytes_be(curve.read_octet_string()?);
        curve.read_optional(Tag::BIT_STRING)?;
        curve.expect_empty("curve")?;

        let generator = EcPoint::from_sec1(domain.read_octet_string()?)?;
        let order = domain.read_unsigned()?;
        let cofactor = match domain.any_left() && domain.peek_tag()? == Tag::INTEGER {
            true => Some(domain.read_unsigned()?),
            false => None,
        };
        // optional hash algorithm, which nothing here uses
        domain.read_optional(Tag::SEQUENCE)?;
        domain.expect_empty("EC parameters")?;

        Ok(Self {
            p,
            a,
            b,
            generator,
            order,
            cofactor,
        })
    }

    fn write(&self, w: &mut Writer) {
        let field_len = self.field_len();
        w.write_sequence(|w| {
            w.write_small_integer(1);
            w.write_sequence(|w| {
                w.write_oid(oid::PRIME_FIELD);
                w.write_unsigned(&self.p);
            });
            w.write_sequence(|w| {
                w.write_octet_string(&to_fixed(&self.a, field_len));
                w.write_octet_string(&to_fixed(&self.b, field_len));
            });
            w.write_octet_string(&self.generator.to_sec1(field_len));
            w.write_unsigned(&self.order);
            if let Some(cofactor) = &self.cofactor {
                w.write_unsigned(cofactor);
            }
        });
    }
}

/// The curve a key is on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EllipticCurve {
    /// A curve from certkit's table.
    Named(NamedCurve),
    /// Explicit parameters that match no curve in the table.
    Explicit(Box<CurveParameters>),
}

impl EllipticCurve {
    /// Wrap `parameters`, replacing them by name if they match a known curve.
    pub fn from_parameters(parameters: CurveParameters) -> Self {
        match parameters.named() {
            Some(curve) => Self::Named(curve),
            None => Self::Explicit(Box::new(parameters)),
        }
    }

    /// The named curve, if this is one.
    pub fn named(&self) -> Option<NamedCurve> {
        match self {
            Self::Named(curve) => Some(*curve),
            Self::Explicit(_) => None,
        }
    }

    /// Bytes needed to hold a field element.
    pub fn field_len(&self) -> usize {
        match self {
            Self::Named(curve) => curve.field_len(),
            Self::Explicit(params) => params.field_len(),
        }
    }

    pub(crate) fn require_named(&self) -> Result<NamedCurve, Error> {
        self.named()
            .ok_or_else(|| Error::UnsupportedCurve("explicit parameters".into()))
    }

    /// Reads `ECParameters`: a named curve OID or a `SpecifiedECDomain`.
    pub(crate) fn read(rd: &mut Reader<'_>) -> Result<Self, Error> {
        match rd.peek_tag()? {
            Tag::OID => {
                let oid = rd.read_oid()?;
                NamedCurve::from_oid(oid)
                    .map(Self::Named)
                    .ok_or_else(|| Error::UnsupportedCurve(oid::to_dotted(oid)))
            }
            Tag::SEQUENCE => CurveParameters::read(rd).map(Self::from_parameters),
            Tag::NULL => Err(Error::UnsupportedCurve("implicitCA".into())),
            got => Err(EncodingError::UnexpectedTag {
                expected: Tag::OID,
                got,
            }
            .into()),
        }
    }

    pub(crate) fn write(&self, w: &mut Writer) {
        match self {
            Self::Named(curve) => w.write_oid(curve.oid()),
            Self::Explicit(params) => params.write(w),
        }
    }
}

/// A point on an elliptic curve.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EcPoint {
    /// The point at infinity.
    Infinity,
    /// A point with affine coordinates.
    Affine {
        /// The x coordinate
        x: BigUint,
        /// The y coordinate
        y: BigUint,
    },
}

impl EcPoint {
    /// Decode a SEC1 point encoding.
    ///
    /// Only the uncompressed form is supported.
    pub fn from_sec1(encoded: &[u8]) -> Result<Self, Error> {
        match encoded {
            [0x00] => Ok(Self::Infinity),
            [0x04, coords @ ..] if !coords.is_empty() && coords.len() % 2 == 0 => {
                let (x, y) = coords.split_at(coords.len() / 2);
                Ok(Self::Affine {
                    x: BigUint::from_bytes_be(x),
                    y: BigUint::from_bytes_be(y),
                })
            }
            [0x02 | 0x03 | 0x06 | 0x07, ..] => Err(Error::UnsupportedAlgorithm(
                "compressed elliptic curve point".into(),
            )),
            _ => Err(EncodingError::InvalidPoint.into()),
        }
    }

    /// Encode in uncompressed SEC1 form with coordinates of `field_len` bytes.
    pub fn to_sec1(&self, field_len: usize) -> Vec<u8> {
        match self {
            Self::Infinity => alloc::vec![0x00],
            Self::Affine { x, y } => {
                let mut out = Vec::with_capacity(1 + 2 * field_len);
                out.push(0x04);
                out.extend_from_slice(&to_fixed(x, field_len));
                out.extend_from_slice(&to_fixed(y, field_len));
                out
            }
        }
    }

    /// Whether this is the point at infinity.
    pub fn is_infinity(&self) -> bool {
        matches!(self, Self::Infinity)
    }
}

/// An elliptic-curve public key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EcPublicKey {
    /// The curve
    pub curve: EllipticCurve,
    /// The public point
    pub point: EcPoint,
}

impl EcPublicKey {
    /// The point in uncompressed SEC1 form.
    pub fn to_sec1_point(&self) -> Vec<u8> {
        self.point
            .to_sec1(self.curve.field_len())
    }
}

/// An elliptic-curve private key.
#[derive(Clone, PartialEq, Eq)]
pub struct EcPrivateKey {
    /// The curve
    pub curve: EllipticCurve,
    /// The public point
    pub point: EcPoint,
    /// The private scalar, big-endian and exactly as long as a field element
    pub secret: Zeroizing<Vec<u8>>,
}

impl EcPrivateKey {
    /// Decode a SEC1 `ECPrivateKey`, as found in `EC PRIVATE KEY` PEM files.
    ///
    /// The encoding must name its curve.  If it omits the public point, the
    /// point is computed by `provider`.
    pub fn from_sec1_der(der: &[u8], provider: &CryptoProvider) -> Result<Self, Error> {
        let mut rd = Reader::init(der);
        let key = Self::read_sec1(&mut rd, None, provider)?;
        rd.expect_empty("EC private key")?;
        Ok(key)
    }

    /// Encode as a SEC1 `ECPrivateKey`, including the curve and public point.
    pub fn to_sec1_der(&self) -> PrivateSec1KeyDer<'static> {
        let mut w = Writer::new();
        self.write_sec1(&mut w);
        PrivateSec1KeyDer::from(w.finish())
    }

    /// The matching public key.
    pub fn public_key(&self) -> EcPublicKey {
        EcPublicKey {
            curve: self.curve.clone(),
            point: self.point.clone(),
        }
    }

    /// Reads an `ECPrivateKey`.  `outer_curve` comes from an enclosing
    /// algorithm identifier and is used if the structure has no `[0]` parameters.
    pub(crate) fn read_sec1(
        rd: &mut Reader<'_>,
        outer_curve: Option<EllipticCurve>,
        provider: &CryptoProvider,
    ) -> Result<Self, Error> {
        let mut seq = rd.read_sequence()?;
        if seq.read_small_integer()? != 1 {
            return Err(EncodingError::UnsupportedVersion("EC private key").into());
        }
        let secret = seq.read_octet_string()?;

        let inner_curve = match seq.read_optional_context(0)? {
            Some(mut params) => {
                let curve = EllipticCurve::read(&mut params)?;
                params.expect_empty("EC parameters")?;
                Some(curve)
            }
            None => None,
        };

        let point = match seq.read_optional_context(1)? {
            Some(mut public) => {
                let point = EcPoint::from_sec1(public.read_bit_string_bytes()?)?;
                public.expect_empty("EC public key")?;
                Some(point)
            }
            None => None,
        };
        seq.expect_empty("EC private key")?;

        let curve = inner_curve
            .or(outer_curve)
            .ok_or(EncodingError::MissingField("EC parameters"))?;

        let field_len = curve.field_len();
        let start = secret
            .iter()
            .position(|&b| b != 0)
            .unwrap_or(secret.len());
        let significant = &secret[start..];
        if significant.is_empty() || significant.len() > field_len {
            return Err(EncodingError::IntegerOutOfRange.into());
        }
        let mut padded = Zeroizing::new(alloc::vec![0u8; field_len]);
        padded[field_len - significant.len()..].copy_from_slice(significant);

        let point = match point {
            Some(point) => point,
            None => {
                trace!("computing missing EC public point");
                let curve = curve.require_named()?;
                EcPoint::from_sec1(&provider.ecdsa.public_point(curve, &padded)?)?
            }
        };

        if point.is_infinity() {
            return Err(EncodingError::InvalidPoint.into());
        }

        Ok(Self {
            curve,
            point,
            secret: padded,
        })
    }

    pub(crate) fn write_sec1(&self, w: &mut Writer) {
        w.write_sequence(|w| {
            w.write_small_integer(1);
            w.write_octet_string(&self.secret);
            w.write_context(0, |w| self.curve.write(w));
            w.write_context(1, |w| {
                w.write_bit_string(
                    &self
                        .point
                        .to_sec1(self.curve.field_len()),
                )
            });
        });
    }
}

impl fmt::Debug for EcPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EcPrivateKey")
            .field("curve", &self.curve)
            .field("point", &self.point)
            .finish_non_exhaustive()
    }
}

/// Big-endian bytes of `n`, left-padded with zeros to `len`.
fn to_fixed(n: &BigUint, len: usize) -> Vec<u8> {
    let bytes = n.to_bytes_be();
    if bytes.len() >= len {
        return bytes;
    }
    let mut out = alloc::vec![0u8; len - bytes.len()];
    out.extend_from_slice(&bytes);
    out
}

struct CurveConstants {
    p: &'static [u8],
    a: &'static [u8],
    b: &'static [u8],
    gx: &'static [u8],
    gy: &'static [u8],
    n: &'static [u8],
}

const P256: CurveConstants = CurveConstants {
    p: &[
        0xff, 0xff, 0xff, 0xff, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xff, 0xff, 0xff, 0xff,
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    ],
    a: &[
        0xff, 0xff, 0xff, 0xff, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xff, 0xff, 0xff, 0xff,
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfc,
    ],
    b: &[
        0x5a, 0xc6, 0x35, 0xd8, 0xaa, 0x3a, 0x93, 0xe7, 0xb3, 0xeb, 0xbd, 0x55,
        0x76, 0x98, 0x86, 0xbc, 0x65, 0x1d, 0x06, 0xb0, 0xcc, 0x53, 0xb0, 0xf6,
        0x3b, 0xce, 0x3c, 0x3e, 0x27, 0xd2, 0x60, 0x4b,
    ],
    gx: &[
        0x6b, 0x17, 0xd1, 0xf2, 0xe1, 0x2c, 0x42, 0x47, 0xf8, 0xbc, 0xe6, 0xe5,
        0x63, 0xa4, 0x40, 0xf2, 0x77, 0x03, 0x7d, 0x81, 0x2d, 0xeb, 0x33, 0xa0,
        0xf4, 0xa1, 0x39, 0x45, 0xd8, 0x98, 0xc2, 0x96,
    ],
    gy: &[
        0x4f, 0xe3, 0x42, 0xe2, 0xfe, 0x1a, 0x7f, 0x9b, 0x8e, 0xe7, 0xeb, 0x4a,
        0x7c, 0x0f, 0x9e, 0x16, 0x2b, 0xce, 0x33, 0x57, 0x6b, 0x31, 0x5e, 0xce,
        0xcb, 0xb6, 0x40, 0x68, 0x37, 0xbf, 0x51, 0xf5,
    ],
    n: &[
        0xff, 0xff, 0xff, 0xff, 0x00, 0x00, 0x00, 0x00, 0xff, 0xff, 0xff, 0xff,
        0xff, 0xff, 0xff, 0xff, 0xbc, 0xe6, 0xfa, 0xad, 0xa7, 0x17, 0x9e, 0x84,
        0xf3, 0xb9, 0xca, 0xc2, 0xfc, 0x63, 0x25, 0x51,
    ],
};

const P384: CurveConstants = CurveConstants {
    p: &[
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfe, 0xff, 0xff, 0xff, 0xff,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xff, 0xff, 0xff, 0xff,
    ],
    a: &[
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfe, 0xff, 0xff, 0xff, 0xff,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xff, 0xff, 0xff, 0xfc,
    ],
    b: &[
        0xb3, 0x31, 0x2f, 0xa7, 0xe2, 0x3e, 0xe7, 0xe4, 0x98, 0x8e, 0x05, 0x6b,
        0xe3, 0xf8, 0x2d, 0x19, 0x18, 0x1d, 0x9c, 0x6e, 0xfe, 0x81, 0x41, 0x12,
        0x03, 0x14, 0x08, 0x8f, 0x50, 0x13, 0x87, 0x5a, 0xc6, 0x56, 0x39, 0x8d,
        0x8a, 0x2e, 0xd1, 0x9d, 0x2a, 0x85, 0xc8, 0xed, 0xd3, 0xec, 0x2a, 0xef,
    ],
    gx: &[
        0xaa, 0x87, 0xca, 0x22, 0xbe, 0x8b, 0x05, 0x37, 0x8e, 0xb1, 0xc7, 0x1e,
        0xf3, 0x20, 0xad, 0x74, 0x6e, 0x1d, 0x3b, 0x62, 0x8b, 0xa7, 0x9b, 0x98,
        0x59, 0xf7, 0x41, 0xe0, 0x82, 0x54, 0x2a, 0x38, 0x55, 0x02, 0xf2, 0x5d,
        0xbf, 0x55, 0x29, 0x6c, 0x3a, 0x54, 0x5e, 0x38, 0x72, 0x76, 0x0a, 0xb7,
    ],
    gy: &[
        0x36, 0x17, 0xde, 0x4a, 0x96, 0x26, 0x2c, 0x6f, 0x5d, 0x9e, 0x98, 0xbf,
        0x92, 0x92, 0xdc, 0x29, 0xf8, 0xf4, 0x1d, 0xbd, 0x28, 0x9a, 0x14, 0x7c,
        0xe9, 0xda, 0x31, 0x13, 0xb5, 0xf0, 0xb8, 0xc0, 0x0a, 0x60, 0xb1, 0xce,
        0x1d, 0x7e, 0x81, 0x9d, 0x7a, 0x43, 0x1d, 0x7c, 0x90, 0xea, 0x0e, 0x5f,
    ],
    n: &[
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xc7, 0x63, 0x4d, 0x81, 0xf4, 0x37, 0x2d, 0xdf, 0x58, 0x1a, 0x0d, 0xb2,
        0x48, 0xb0, 0xa7, 0x7a, 0xec, 0xec, 0x19, 0x6a, 0xcc, 0xc5, 0x29, 0x73,
    ],
};

const P521: CurveConstants = CurveConstants {
    p: &[
        0x01, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    ],
    a: &[
        0x01, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0xff, 0xff, 0xff, 0xff, 0xfc,
    ],
    b: &[
        0x00, 0x51, 0x95, 0x3e, 0xb9, 0x61, 0x8e, 0x1c, 0x9a, 0x1f, 0x92, 0x9a,
        0x21, 0xa0, 0xb6, 0x85, 0x40, 0xee, 0xa2, 0xda, 0x72, 0x5b, 0x99, 0xb3,
        0x15, 0xf3, 0xb8, 0xb4, 0x89, 0x91, 0x8e, 0xf1, 0x09, 0xe1, 0x56, 0x19,
        0x39, 0x51, 0xec, 0x7e, 0x93, 0x7b, 0x16, 0x52, 0xc0, 0xbd, 0x3b, 0xb1,
        0xbf, 0x07, 0x35, 0x73, 0xdf, 0x88, 0x3d, 0x2c, 0x34, 0xf1, 0xef, 0x45,
        0x1f, 0xd4, 0x6b, 0x50, 0x3f, 0x00,
    ],
    gx: &[
        0x00, 0xc6, 0x85, 0x8e, 0x06, 0xb7, 0x04, 0x04, 0xe9, 0xcd, 0x9e, 0x3e,
        0xcb, 0x66, 0x23, 0x95, 0xb4, 0x42, 0x9c, 0x64, 0x81, 0x39, 0x05, 0x3f,
        0xb5, 0x21, 0xf8, 0x28, 0xaf, 0x60, 0x6b, 0x4d, 0x3d, 0xba, 0xa1, 0x4b,
        0x5e, 0x77, 0xef, 0xe7, 0x59, 0x28, 0xfe, 0x1d, 0xc1, 0x27, 0xa2, 0xff,
        0xa8, 0xde, 0x33, 0x48, 0xb3, 0xc1, 0x85, 0x6a, 0x42, 0x9b, 0xf9, 0x7e,
        0x7e, 0x31, 0xc2, 0xe5, 0xbd, 0x66,
    ],
    gy: &[
        0x01, 0x18, 0x39, 0x29, 0x6a, 0x78, 0x9a, 0x3b, 0xc0, 0x04, 0x5c, 0x8a,
        0x5f, 0xb4, 0x2c, 0x7d, 0x1b, 0xd9, 0x98, 0xf5, 0x44, 0x49, 0x57, 0x9b,
        0x44, 0x68, 0x17, 0xaf, 0xbd, 0x17, 0x27, 0x3e, 0x66, 0x2c, 0x97, 0xee,
        0x72, 0x99, 0x5e, 0xf4, 0x26, 0x40, 0xc5, 0x50, 0xb9, 0x01, 0x3f, 0xad,
        0x07, 0x61, 0x35, 0x3c, 0x70, 0x86, 0xa2, 0x72, 0xc2, 0x40, 0x88, 0xbe,
        0x94, 0x76, 0x9f, 0xd1, 0x66, 0x50,
    ],
    n: &[
        0x01, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfa, 0x51, 0x86,
        0x87, 0x83, 0xbf, 0x2f, 0x96, 0x6b, 0x7f, 0xcc, 0x01, 0x48, 0xf7, 0x09,
        0xa5, 0xd0, 0x3b, 0xb5, 0xc9, 0xb8, 0x89, 0x9c, 0x47, 0xae, 0xbb, 0x6f,
        0xb7, 0x1e, 0x91, 0x38, 0x64, 0x09,
    ],
};

const K256: CurveConstants = CurveConstants {
    p: &[
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0xff, 0xff, 0xfe, 0xff, 0xff, 0xfc, 0x2f,
    ],
    a: &[
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    ],
    b: &[
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x07,
    ],
    gx: &[
        0x79, 0xbe, 0x66, 0x7e, 0xf9, 0xdc, 0xbb, 0xac, 0x55, 0xa0, 0x62, 0x95,
        0xce, 0x87, 0x0b, 0x07, 0x02, 0x9b, 0xfc, 0xdb, 0x2d, 0xce, 0x28, 0xd9,
        0x59, 0xf2, 0x81, 0x5b, 0x16, 0xf8, 0x17, 0x98,
    ],
    gy: &[
        0x48, 0x3a, 0xda, 0x77, 0x26, 0xa3, 0xc4, 0x65, 0x5d, 0xa4, 0xfb, 0xfc,
        0x0e, 0x11, 0x08, 0xa8, 0xfd, 0x17, 0xb4, 0x48, 0xa6, 0x85, 0x54, 0x19,
        0x9c, 0x47, 0xd0, 0x8f, 0xfb, 0x10, 0xd4, 0xb8,
    ],
    n: &[
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0xff, 0xff, 0xfe, 0xba, 0xae, 0xdc, 0xe6, 0xaf, 0x48, 0xa0, 0x3b,
        0xbf, 0xd2, 0x5e, 0x8c, 0xd0, 0x36, 0x41, 0x41,
    ],
};
