use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use crate::der::{is_printable, Reader, Writer};
use crate::error::Error;
use crate::log::debug;
use crate::oid;

/// The distinguished-name attribute types certkit understands.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NameAttribute {
    /// `CN`
    CommonName,
    /// `C`
    CountryName,
    /// `L`
    LocalityName,
    /// `ST`
    StateOrProvinceName,
    /// `street`
    StreetAddress,
    /// `O`
    OrganizationName,
    /// `OU`
    OrganizationalUnitName,
    /// `title`
    Title,
    /// `serialNumber`
    SerialNumber,
    /// `SN`
    Surname,
    /// `GN`
    GivenName,
    /// `initials`
    Initials,
    /// `generationQualifier`
    GenerationQualifier,
    /// `dnQualifier`
    DnQualifier,
    /// `pseudonym`
    Pseudonym,
    /// `emailAddress`
    EmailAddress,
    /// `DC`
    DomainComponent,
    /// `UID`
    UserId,
    /// `postalCode`
    PostalCode,
    /// `businessCategory`
    BusinessCategory,
    /// `jurisdictionC`
    JurisdictionCountryName,
    /// `jurisdictionST`
    JurisdictionStateOrProvinceName,
    /// `jurisdictionL`
    JurisdictionLocalityName,
}

impl NameAttribute {
    /// Every attribute type.
    pub const ALL: [Self; 23] = [
        Self::CommonName,
        Self::CountryName,
        Self::LocalityName,
        Self::StateOrProvinceName,
        Self::StreetAddress,
        Self::OrganizationName,
        Self::OrganizationalUnitName,
        Self::Title,
        Self::SerialNumber,
        Self::Surname,
        Self::GivenName,
        Self::Initials,
        Self::GenerationQualifier,
        Self::DnQualifier,
        Self::Pseudonym,
        Self::EmailAddress,
        Self::DomainComponent,
        Self::UserId,
        Self::PostalCode,
        Self::BusinessCategory,
        Self::JurisdictionCountryName,
        Self::JurisdictionStateOrProvinceName,
        Self::JurisdictionLocalityName,
    ];

    /// The attribute type's object identifier.
    pub fn oid(self) -> &'static [u8] {
        match self {
            Self::CommonName => oid::COMMON_NAME,
            Self::CountryName => oid::COUNTRY_NAME,
            Self::LocalityName => oid::LOCALITY_NAME,
            Self::StateOrProvinceName => oid::STATE_OR_PROVINCE_NAME,
            Self::StreetAddress => oid::STREET_ADDRESS,
            Self::OrganizationName => oid::ORGANIZATION_NAME,
            Self::OrganizationalUnitName => oid::ORGANIZATIONAL_UNIT_NAME,
            Self::Title => oid::TITLE,
            Self::SerialNumber => oid::SERIAL_NUMBER,
            Self::Surname => oid::SURNAME,
            Self::GivenName => oid::GIVEN_NAME,
            Self::Initials => oid::INITIALS,
            Self::GenerationQualifier => oid::GENERATION_QUALIFIER,
            Self::DnQualifier => oid::DN_QUALIFIER,
            Self::Pseudonym => oid::PSEUDONYM,
            Self::EmailAddress => oid::EMAIL_ADDRESS,
            Self::DomainComponent => oid::DOMAIN_COMPONENT,
            Self::UserId => oid::USER_ID,
            Self::PostalCode => oid::POSTAL_CODE,
            Self::BusinessCategory => oid::BUSINESS_CATEGORY,
            Self::JurisdictionCountryName => oid::JURISDICTION_COUNTRY_NAME,
            Self::JurisdictionStateOrProvinceName => oid::JURISDICTION_STATE_OR_PROVINCE_NAME,
            Self::JurisdictionLocalityName => oid::JURISDICTION_LOCALITY_NAME,
        }
    }

    /// Look up an attribute type by object identifier.
    pub fn from_oid(oid: &[u8]) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|attr| attr.oid() == oid)
    }

    /// The short name used in textual distinguished names, eg. `CN`.
    pub fn short_name(self) -> &'static str {
        match self {
            Self::CommonName => "CN",
            Self::CountryName => "C",
            Self::LocalityName => "L",
            Self::StateOrProvinceName => "ST",
            Self::StreetAddress => "street",
            Self::OrganizationName => "O",
            Self::OrganizationalUnitName => "OU",
            Self::Title => "title",
            Self::SerialNumber => "serialNumber",
            Self::Surname => "SN",
            Self::GivenName => "GN",
            Self::Initials => "initials",
            Self::GenerationQualifier => "generationQualifier",
            Self::DnQualifier => "dnQualifier",
            Self::Pseudonym => "pseudonym",
            Self::EmailAddress => "emailAddress",
            Self::DomainComponent => "DC",
            Self::UserId => "UID",
            Self::PostalCode => "postalCode",
            Self::BusinessCategory => "businessCategory",
            Self::JurisdictionCountryName => "jurisdictionC",
            Self::JurisdictionStateOrProvinceName => "jurisdictionST",
            Self::JurisdictionLocalityName => "jurisdictionL",
        }
    }

    /// The long name, eg. `commonName`.
    pub fn long_name(self) -> &'static str {
        match self {
            Self::CommonName => "commonName",
            Self::CountryName => "countryName",
            Self::LocalityName => "localityName",
            Self::StateOrProvinceName => "stateOrProvinceName",
            Self::StreetAddress => "streetAddress",
            Self::OrganizationName => "organizationName",
            Self::OrganizationalUnitName => "organizationalUnitName",
            Self::Title => "title",
            Self::SerialNumber => "serialNumber",
            Self::Surname => "surname",
            Self::GivenName => "givenName",
            Self::Initials => "initials",
            Self::GenerationQualifier => "generationQualifier",
            Self::DnQualifier => "dnQualifier",
            Self::Pseudonym => "pseudonym",
            Self::EmailAddress => "emailAddress",
            Self::DomainComponent => "domainComponent",
            Self::UserId => "userId",
            Self::PostalCode => "postalCode",
            Self::BusinessCategory => "businessCategory",
            Self::JurisdictionCountryName => "jurisdictionCountryName",
            Self::JurisdictionStateOrProvinceName => "jurisdictionStateOrProvinceName",
            Self::JurisdictionLocalityName => "jurisdictionLocalityName",
        }
    }

    fn write_value(self, w: &mut Writer, value: &str) {
        match self {
            Self::CountryName
            | Self::SerialNumber
            | Self::DnQualifier
            | Self::JurisdictionCountryName
                if value.chars().all(is_printable) =>
            {
                w.write_printable_string(value)
            }
            Self::EmailAddress | Self::DomainComponent if value.is_ascii() => {
                w.write_ia5_string(value)
            }
            _ => w.write_utf8_string(value),
        }
    }
}

impl fmt::Display for NameAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// Accepts either the short or the long name, ignoring ASCII case.
impl FromStr for NameAttribute {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|attr| {
                attr.short_name().eq_ignore_ascii_case(s) || attr.long_name().eq_ignore_ascii_case(s)
            })
            .ok_or_else(|| Error::UnknownName(s.into()))
    }
}

/// An X.509 distinguished name, as an ordered list of attributes.
///
/// Multi-valued relative distinguished names are flattened on decode, and
/// attributes outside [`NameAttribute`] are dropped.  Each attribute becomes
/// its own RDN on encode.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DistinguishedName(pub Vec<(NameAttribute, String)>);

impl DistinguishedName {
    /// An empty name.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an attribute, builder-style.
    pub fn with(mut self, attribute: NameAttribute, value: impl Into<String>) -> Self {
        self.push(attribute, value);
        self
    }

    /// Append an attribute.
    pub fn push(&mut self, attribute: NameAttribute, value: impl Into<String>) {
        self.0.push((attribute, value.into()));
    }

    /// The first value of `attribute`, if any.
    pub fn get(&self, attribute: NameAttribute) -> Option<&str> {
        self.0
            .iter()
            .find(|(attr, _)| *attr == attribute)
            .map(|(_, value)| value.as_str())
    }

    /// Iterate over the attributes in order.
    pub fn iter(&self) -> impl Iterator<Item = &(NameAttribute, String)> {
        self.0.iter()
    }

    /// Whether there are no attributes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn read(rd: &mut Reader<'_>) -> Result<Self, Error> {
        let mut rdns = rd.read_sequence()?;
        let mut name = Self::new();

        while rdns.any_left() {
            let mut rdn = rdns.read_set()?;
            while rdn.any_left() {
                let mut atv = rdn.read_sequence()?;
                let attr_oid = atv.read_oid()?;
                let value = atv.read_directory_string()?;
                atv.expect_empty("attribute")?;

                match NameAttribute::from_oid(attr_oid) {
                    Some(attr) => name.push(attr, value),
                    None => debug!(
                        "skipping unknown name attribute {}",
                        oid::to_dotted(attr_oid)
                    ),
                }
            }
        }

        Ok(name)
    }

    pub(crate) fn write(&self, w: &mut Writer) {
        w.write_sequence(|w| {
            for (attr, value) in &self.0 {
                w.write_set(|w| {
                    w.write_sequence(|w| {
                        w.write_oid(attr.oid());
                        attr.write_value(w, value);
                    })
                });
            }
        });
    }
}

/// Formats as `CN=example, O=Example Ltd`, escaping as RFC 4514 does.
impl fmt::Display for DistinguishedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (attr, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{attr}=")?;
            let last = value.chars().count().saturating_sub(1);
            for (j, c) in value.chars().enumerate() {
                let escape = matches!(c, ',' | '+' | '"' | '\\' | '<' | '>' | ';')
                    || (j == 0 && matches!(c, ' ' | '#'))
                    || (j == last && c == ' ');
                if escape {
                    f.write_str("\\")?;
                }
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}
