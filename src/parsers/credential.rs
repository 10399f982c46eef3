use anyhow::Result;

use crate::model::connector::Credential;
use crate::model::element::{Element, QName};

pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Injected credential-element parser.
pub type CredentialParserFn<C> = Box<dyn Fn(&Element) -> Result<C> + Send + Sync>;

/// Keep a credential element as an opaque sub-tree, noting its `xsi:type`.
pub fn parse_credential(element: &Element) -> Result<Credential> {
    let credential_type = element
        .attribute(&QName::new(XSI_NAMESPACE, "type"))
        .map(|t| element.resolve_qname_value(t));
    Ok(Credential {
        credential_type,
        element: element.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::element::parse_str;

    #[test]
    fn test_parse_credential_resolves_type() {
        let xml = r#"
        <gfipm:TrustCredential xmlns:gfipm="urn:gfipm:dc"
                               xmlns:security="urn:mace:shibboleth:2.0:security"
                               xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
                               id="trust" xsi:type="security:X509Filesystem">
            <security:Certificate>/opt/shibboleth-idp/credentials/bae.crt</security:Certificate>
        </gfipm:TrustCredential>
        "#;
        let element = parse_str(xml).unwrap();
        let credential = parse_credential(&element).unwrap();
        assert_eq!(
            credential.credential_type,
            Some(QName::new("urn:mace:shibboleth:2.0:security", "X509Filesystem"))
        );
        assert_eq!(credential.element.children.len(), 1);
        assert_eq!(
            credential.element.children[0].text.trim(),
            "/opt/shibboleth-idp/credentials/bae.crt"
        );
    }

    #[test]
    fn test_parse_credential_without_type() {
        let element = parse_str(r#"<AuthenticationCredential xmlns="urn:gfipm:dc"/>"#).unwrap();
        let credential = parse_credential(&element).unwrap();
        assert!(credential.credential_type.is_none());
    }
}
