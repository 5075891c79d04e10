use std::net::Ipv4Addr;

/// Host addresses of the local subnet, `[base + 1, broadcast)`, minus the
/// local address.
///
/// Arithmetic is done on host-order `u32`s. /31 and /32 networks yield an
/// empty range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubnetRange {
    pub base: Ipv4Addr,
    pub broadcast: Ipv4Addr,
    pub local: Ipv4Addr,
}

impl SubnetRange {
    pub fn new(local: Ipv4Addr, netmask: Ipv4Addr) -> Self {
        let local_bits: u32 = local.into();
        let mask_bits: u32 = netmask.into();

        Self {
            base: Ipv4Addr::from(local_bits & mask_bits),
            broadcast: Ipv4Addr::from(local_bits | !mask_bits),
            local,
        }
    }

    pub fn to_iter(self) -> impl Iterator<Item = Ipv4Addr> {
        let start: u32 = u32::from(self.base).saturating_add(1);
        let end: u32 = self.broadcast.into();
        let local: u32 = self.local.into();
        (start..end)
            .filter(move |addr| *addr != local)
            .map(Ipv4Addr::from)
    }

    /// Number of addresses [`Self::to_iter`] yields.
    pub fn len(&self) -> usize {
        let start: u32 = u32::from(self.base).saturating_add(1);
        let end: u32 = self.broadcast.into();
        let span: usize = end.saturating_sub(start) as usize;
        if self.in_host_span(self.local) {
            span - 1
        } else {
            span
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when `addr` would be probed.
    pub fn contains(&self, addr: Ipv4Addr) -> bool {
        addr != self.local && self.in_host_span(addr)
    }

    fn in_host_span(&self, addr: Ipv4Addr) -> bool {
        let bits: u32 = addr.into();
        bits > u32::from(self.base) && bits < u32::from(self.broadcast)
    }
}
