use crate::{
    status::{normalize_bedrock, normalize_legacy, normalize_modern, LegacyKind},
    Family, Icon, IconSet, ProbeConf, ProtocolClient, StatusErr, StatusResult, Target,
};
use std::time::{Duration, Instant};

/// One step of a fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attempt {
    /// 1.7+ status handshake.
    Modern,
    /// 1.6 ping.
    Netty,
    /// 1.4 to 1.5 ping.
    Legacy,
    /// Beta 1.8 to 1.3 ping.
    Beta,
    /// Bedrock ping on the port of the target.
    Bedrock,
    /// Bedrock ping on [ProbeConf::bedrock_fallback_port], ignoring the target port.
    BedrockFallbackPort,
}

impl Attempt {
    /// Family whose protocol this step speaks.
    pub fn family(self) -> Family {
        match self {
            Attempt::Modern | Attempt::Netty | Attempt::Legacy | Attempt::Beta => Family::Java,
            Attempt::Bedrock | Attempt::BedrockFallbackPort => Family::Bedrock,
        }
    }
}

/// Java probes, most informative protocol first.
///
/// The last two steps speak Bedrock: a target labelled Java may be a Bedrock
/// server, and the result then reports `server_type` bedrock.
pub const JAVA_CHAIN: &[Attempt] = &[
    Attempt::Modern,
    Attempt::Netty,
    Attempt::Legacy,
    Attempt::Beta,
    Attempt::Bedrock,
    Attempt::BedrockFallbackPort,
];

pub const BEDROCK_CHAIN: &[Attempt] = &[Attempt::Bedrock];

pub fn chain_for(family: Family) -> &'static [Attempt] {
    match family {
        Family::Java => JAVA_CHAIN,
        Family::Bedrock => BEDROCK_CHAIN,
    }
}

/// Everything a probe found out.
#[derive(Debug)]
pub struct ProbeOutcome {
    /// The normalized result, or the offline sentinel.
    pub result: StatusResult,
    /// Icon to serve alongside `result`.
    pub icon: Icon,
    /// Whether some step answered.
    pub online: bool,
    /// The step that answered.
    pub answered_by: Option<Attempt>,
    /// Failed steps in the order they were tried.
    pub failures: Vec<(Attempt, StatusErr)>,
}

impl ProbeOutcome {
    /// Failure of the first step, the most telling one when everything failed.
    pub fn first_failure(&self) -> Option<&(Attempt, StatusErr)> {
        self.failures.first()
    }
}

/// Runs the fallback chain of a target against a [ProtocolClient].
#[derive(Debug, Clone)]
pub struct Prober<C> {
    client: C,
    icons: IconSet,
    conf: ProbeConf,
}

impl<C: ProtocolClient> Prober<C> {
    pub fn create(client: C, icons: IconSet, conf: ProbeConf) -> Self {
        Self {
            client,
            icons,
            conf,
        }
    }

    pub fn icons(&self) -> &IconSet {
        &self.icons
    }

    pub fn conf(&self) -> &ProbeConf {
        &self.conf
    }

    /// Try every step of the target's chain in order, stopping at the first answer.
    ///
    /// Never fails: when nothing answers the outcome carries the offline
    /// sentinel of the target's family.
    pub fn probe(&self, target: &Target) -> ProbeOutcome {
        let started = Instant::now();
        let mut failures = Vec::new();

        for &attempt in chain_for(target.family) {
            let timeout = match self.attempt_timeout(started) {
                Some(timeout) => timeout,
                None => {
                    log::debug!("{}: deadline spent before {:?}", target, attempt);
                    break;
                }
            };

            match self.try_attempt(attempt, target, timeout) {
                Ok((result, icon)) => {
                    log::info!(
                        "{}: answered by {:?} in {:?}",
                        target,
                        attempt,
                        started.elapsed()
                    );

                    return ProbeOutcome {
                        result,
                        icon,
                        online: true,
                        answered_by: Some(attempt),
                        failures,
                    };
                }
                Err(err) => {
                    log::debug!("{}: {:?} failed: {}", target, attempt, err);
                    failures.push((attempt, err));
                }
            }
        }

        if let Some((attempt, err)) = failures.first() {
            log::info!("{}: offline, first failure {:?}: {}", target, attempt, err);
        }

        ProbeOutcome {
            result: StatusResult::offline(target.family, &self.icons),
            icon: self.icons.default_icon(target.family).clone(),
            online: false,
            answered_by: None,
            failures,
        }
    }

    /// Per-step timeout, clamped to what is left of the deadline. `None` once it is spent.
    fn attempt_timeout(&self, started: Instant) -> Option<Duration> {
        match self.conf.deadline {
            None => Some(self.conf.timeout),
            Some(deadline) => {
                let remaining = deadline.saturating_sub(started.elapsed());

                if remaining.is_zero() {
                    None
                } else {
                    Some(self.conf.timeout.min(remaining))
                }
            }
        }
    }

    fn try_attempt(
        &self,
        attempt: Attempt,
        target: &Target,
        timeout: Duration,
    ) -> Result<(StatusResult, Icon), StatusErr> {
        let icons = &self.icons;

        match attempt {
            Attempt::Modern => {
                let server = self.client.ping_modern(target, timeout)?;
                Ok(normalize_modern(&server, target, icons))
            }
            Attempt::Netty => {
                let server = self.client.ping_netty(target, timeout)?;
                Ok(normalize_legacy(&server, LegacyKind::Netty, target, icons))
            }
            Attempt::Legacy => {
                let server = self.client.ping_legacy(target, timeout)?;
                Ok(normalize_legacy(&server, LegacyKind::Legacy, target, icons))
            }
            Attempt::Beta => {
                let server = self.client.ping_beta(target, timeout)?;
                Ok(normalize_legacy(&server, LegacyKind::Beta, target, icons))
            }
            Attempt::Bedrock => self.bedrock(&target.host, target.port, timeout),
            Attempt::BedrockFallbackPort => {
                self.bedrock(&target.host, self.conf.bedrock_fallback_port, timeout)
            }
        }
    }

    fn bedrock(
        &self,
        host: &str,
        port: u16,
        timeout: Duration,
    ) -> Result<(StatusResult, Icon), StatusErr> {
        let server = self
            .client
            .query_bedrock(host, port, timeout, self.conf.bedrock_min_wait)?;

        Ok(normalize_bedrock(&server, host, port, &self.icons))
    }
}
