use serde::Serialize;

/// A canned policy document for exploring the analyzer.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PolicyExample {
    pub name: &'static str,
    pub description: &'static str,
    pub body: &'static str,
}

/// Bundled example policies. Purely illustrative; validation never depends
/// on them.
pub fn examples() -> Vec<PolicyExample> {
    vec![
        PolicyExample {
            name: "admin-full-access",
            description: "The classic over-broad grant; trips every wildcard warning.",
            body: r#"{
  "Version": "2012-10-17",
  "Statement": [
    {
      "Effect": "Allow",
      "Action": "*",
      "Resource": "*"
    }
  ]
}"#,
        },
        PolicyExample {
            name: "s3-read-only",
            description: "Scoped read access to one bucket, TLS required.",
            body: r#"{
  "Version": "2012-10-17",
  "Statement": [
    {
      "Effect": "Allow",
      "Action": ["s3:GetObject", "s3:ListBucket"],
      "Resource": [
        "arn:aws:s3:::vigil-sim-bucket-logs",
        "arn:aws:s3:::vigil-sim-bucket-logs/*"
      ],
      "Condition": {
        "Bool": { "aws:SecureTransport": "true" }
      }
    }
  ]
}"#,
        },
        PolicyExample {
            name: "deny-without-mfa",
            description: "Blocks everything for sessions without MFA.",
            body: r#"{
  "Version": "2012-10-17",
  "Statement": [
    {
      "Effect": "Deny",
      "Action": "*",
      "Resource": "*",
      "Condition": {
        "BoolIfExists": { "aws:MultiFactorAuthPresent": "false" }
      }
    }
  ]
}"#,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn example_bodies_are_valid_json() {
        for example in examples() {
            let parsed: Result<serde_json::Value, _> = serde_json::from_str(example.body);
            assert!(parsed.is_ok(), "example {} must parse", example.name);
        }
    }

    #[test]
    fn example_names_are_unique() {
        let mut names: Vec<_> = examples().iter().map(|e| e.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), examples().len());
    }
}
