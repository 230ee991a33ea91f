use crate::{Family, Icon, IconSet, ProbeConf, Prober, ProtocolClient, StatusResult, Target};

/// Status of a target. `found` is false when `result` is the offline sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub result: StatusResult,
    pub found: bool,
}

/// Icon of a target. On failure `icon` is the generic default and `found` is false.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconReply {
    pub icon: Icon,
    pub found: bool,
}

/// Entry point for the boundary layer.
#[derive(Debug, Clone)]
pub struct StatusService<C> {
    prober: Prober<C>,
}

impl<C: ProtocolClient> StatusService<C> {
    pub fn create(client: C, icons: IconSet, conf: ProbeConf) -> Self {
        Self {
            prober: Prober::create(client, icons, conf),
        }
    }

    pub fn prober(&self) -> &Prober<C> {
        &self.prober
    }

    pub fn get_status(&self, target: &Target) -> Status {
        let outcome = self.prober.probe(target);

        Status {
            result: outcome.result,
            found: outcome.online,
        }
    }

    /// Resolve the icon of a target.
    ///
    /// Bedrock servers have no icon of their own, so a Bedrock target gets the
    /// Bedrock default without any network traffic.
    pub fn get_icon(&self, target: &Target) -> IconReply {
        match target.family {
            Family::Bedrock => IconReply {
                icon: self.prober.icons().default_icon(Family::Bedrock).clone(),
                found: true,
            },
            Family::Java => {
                let outcome = self.prober.probe(target);

                IconReply {
                    icon: outcome.icon,
                    found: outcome.online,
                }
            }
        }
    }
}
