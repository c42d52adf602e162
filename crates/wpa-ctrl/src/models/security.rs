//! Cipher and key-management sets advertised in scan flags.

use bitflags::bitflags;

bitflags! {
    /// Pairwise and group ciphers, numbered as the daemon numbers them.
    pub struct Cipher: u32 {
        const NONE = 1 << 0;
        const WEP40 = 1 << 1;
        const WEP104 = 1 << 2;
        const TKIP = 1 << 3;
        const CCMP = 1 << 4;
        const AES_128_CMAC = 1 << 5;
        const GCMP = 1 << 6;
        const SMS4 = 1 << 7;
        const GCMP_256 = 1 << 8;
        const CCMP_256 = 1 << 9;
        const BIP_GMAC_128 = 1 << 11;
        const BIP_GMAC_256 = 1 << 12;
        const BIP_CMAC_256 = 1 << 13;
        const GTK_NOT_USED = 1 << 14;
    }
}

bitflags! {
    /// Key-management suites, numbered as the daemon numbers them.
    pub struct KeyMgmt: u32 {
        const IEEE8021X = 1 << 0;
        const PSK = 1 << 1;
        const NONE = 1 << 2;
        const IEEE8021X_NO_WPA = 1 << 3;
        const WPA_NONE = 1 << 4;
        const FT_IEEE8021X = 1 << 5;
        const FT_PSK = 1 << 6;
        const IEEE8021X_SHA256 = 1 << 7;
        const PSK_SHA256 = 1 << 8;
        const WPS = 1 << 9;
        const SAE = 1 << 10;
        const FT_SAE = 1 << 11;
        const WAPI_PSK = 1 << 12;
        const WAPI_CERT = 1 << 13;
        const CCKM = 1 << 14;
        const OSEN = 1 << 15;
        const IEEE8021X_SUITE_B = 1 << 16;
        const IEEE8021X_SUITE_B_192 = 1 << 17;
    }
}

/// Protocol prefixes that mark a flag as a security element.
const SECURITY_PREFIXES: [&str; 4] = ["WPA-", "WPA2-", "RSN-", "OSEN-"];

/// Suite names that themselves contain the element separator, longest first.
const COMPOUND_TOKENS: [(&str, &str); 6] = [
    ("EAP-SUITE-B-192", "EAP_SUITE_B_192"),
    ("EAP-SUITE-B", "EAP_SUITE_B"),
    ("EAP-SHA256", "EAP_SHA256"),
    ("PSK-SHA256", "PSK_SHA256"),
    ("GCMP-256", "GCMP_256"),
    ("CCMP-256", "CCMP_256"),
];

/// Security suites a BSS advertises, union over all of its elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Security {
    pub key_mgmt: KeyMgmt,
    pub ciphers: Cipher,
}

impl Security {
    /// Decode the flags of one scan row.
    ///
    /// A BSS with no WPA/RSN/OSEN element and no `WEP` flag is open:
    /// `KeyMgmt::NONE` and `Cipher::NONE`. Unrecognised tokens such as
    /// `preauth` are ignored.
    pub fn from_flags<S: AsRef<str>>(flags: &[S]) -> Self {
        let mut key_mgmt = KeyMgmt::empty();
        let mut ciphers = Cipher::empty();
        let mut wps = false;

        for flag in flags {
            let flag = flag.as_ref();
            match flag {
                "WEP" => ciphers |= Cipher::WEP40 | Cipher::WEP104,
                "WPS" => wps = true,
                _ => {
                    let Some(body) = SECURITY_PREFIXES
                        .iter()
                        .find_map(|prefix| flag.strip_prefix(prefix))
                    else {
                        continue;
                    };
                    let (k, c) = decode_element(body);
                    key_mgmt |= k;
                    ciphers |= c;
                }
            }
        }

        if key_mgmt.is_empty() {
            key_mgmt = KeyMgmt::NONE;
        }
        if ciphers.is_empty() {
            ciphers = Cipher::NONE;
        }
        if wps {
            key_mgmt |= KeyMgmt::WPS;
        }

        Self { key_mgmt, ciphers }
    }

    /// No authentication and no encryption, WPS aside.
    pub fn is_open(&self) -> bool {
        (self.key_mgmt - KeyMgmt::WPS) == KeyMgmt::NONE && self.ciphers == Cipher::NONE
    }
}

fn decode_element(body: &str) -> (KeyMgmt, Cipher) {
    let mut body = body.to_string();
    for (compound, joined) in COMPOUND_TOKENS {
        body = body.replace(compound, joined);
    }

    let mut key_mgmt = KeyMgmt::empty();
    let mut ciphers = Cipher::empty();
    for token in body.split(['-', '+']) {
        match token {
            "EAP" => key_mgmt |= KeyMgmt::IEEE8021X,
            "PSK" => key_mgmt |= KeyMgmt::PSK,
            "None" => key_mgmt |= KeyMgmt::NONE,
            "FT/EAP" => key_mgmt |= KeyMgmt::FT_IEEE8021X,
            "FT/PSK" => key_mgmt |= KeyMgmt::FT_PSK,
            "EAP_SHA256" => key_mgmt |= KeyMgmt::IEEE8021X_SHA256,
            "PSK_SHA256" => key_mgmt |= KeyMgmt::PSK_SHA256,
            "EAP_SUITE_B" => key_mgmt |= KeyMgmt::IEEE8021X_SUITE_B,
            "EAP_SUITE_B_192" => key_mgmt |= KeyMgmt::IEEE8021X_SUITE_B_192,
            "SAE" => key_mgmt |= KeyMgmt::SAE,
            "FT/SAE" => key_mgmt |= KeyMgmt::FT_SAE,
            "OSEN" => key_mgmt |= KeyMgmt::OSEN,
            "CCKM" => key_mgmt |= KeyMgmt::CCKM,
            "NONE" => ciphers |= Cipher::NONE,
            "WEP40" => ciphers |= Cipher::WEP40,
            "WEP104" => ciphers |= Cipher::WEP104,
            "TKIP" => ciphers |= Cipher::TKIP,
            "CCMP" => ciphers |= Cipher::CCMP,
            "GCMP" => ciphers |= Cipher::GCMP,
            "SMS4" => ciphers |= Cipher::SMS4,
            "GCMP_256" => ciphers |= Cipher::GCMP_256,
            "CCMP_256" => ciphers |= Cipher::CCMP_256,
            _ => {}
        }
    }
    (key_mgmt, ciphers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wpa2_psk_ccmp() {
        let security = Security::from_flags(&["WPA2-PSK-CCMP", "ESS"]);
        assert_eq!(security.key_mgmt, KeyMgmt::PSK);
        assert_eq!(security.ciphers, Cipher::CCMP);
        assert!(!security.is_open());
    }

    #[test]
    fn test_mixed_mode_unions_elements() {
        let security =
            Security::from_flags(&["WPA-PSK-TKIP", "WPA2-PSK+SAE-CCMP+TKIP-preauth", "ESS"]);
        assert_eq!(security.key_mgmt, KeyMgmt::PSK | KeyMgmt::SAE);
        assert_eq!(security.ciphers, Cipher::TKIP | Cipher::CCMP);
    }

    #[test]
    fn test_hyphenated_suites_stay_whole() {
        let security = Security::from_flags(&["RSN-EAP-SUITE-B-192-GCMP-256"]);
        assert_eq!(security.key_mgmt, KeyMgmt::IEEE8021X_SUITE_B_192);
        assert_eq!(security.ciphers, Cipher::GCMP_256);

        let security = Security::from_flags(&["WPA2-FT/PSK+PSK-SHA256-CCMP-256"]);
        assert_eq!(security.key_mgmt, KeyMgmt::FT_PSK | KeyMgmt::PSK_SHA256);
        assert_eq!(security.ciphers, Cipher::CCMP_256);

        let security = Security::from_flags(&["WPA2-EAP-SUITE-B-GCMP"]);
        assert_eq!(security.key_mgmt, KeyMgmt::IEEE8021X_SUITE_B);
        assert_eq!(security.ciphers, Cipher::GCMP);
    }

    #[test]
    fn test_wep_and_open() {
        let wep = Security::from_flags(&["WEP", "ESS"]);
        assert_eq!(wep.key_mgmt, KeyMgmt::NONE);
        assert_eq!(wep.ciphers, Cipher::WEP40 | Cipher::WEP104);
        assert!(!wep.is_open());

        let open = Security::from_flags(&["ESS", "WPS"]);
        assert_eq!(open.key_mgmt, KeyMgmt::NONE | KeyMgmt::WPS);
        assert_eq!(open.ciphers, Cipher::NONE);
        assert!(open.is_open());

        assert!(Security::from_flags::<&str>(&[]).is_open());
    }

    #[test]
    fn test_non_security_flags_ignored() {
        let security = Security::from_flags(&["ESS", "P2P", "HS20", "WPA2-EAP-CCMP"]);
        assert_eq!(security.key_mgmt, KeyMgmt::IEEE8021X);
        assert_eq!(security.ciphers, Cipher::CCMP);
    }

    #[test]
    fn test_bit_values_match_daemon_numbering() {
        assert_eq!(Cipher::CCMP.bits(), 16);
        assert_eq!(Cipher::BIP_GMAC_128.bits(), 1 << 11);
        assert_eq!(KeyMgmt::SAE.bits(), 1 << 10);
        assert_eq!(KeyMgmt::IEEE8021X_SUITE_B_192.bits(), 1 << 17);
    }
}
