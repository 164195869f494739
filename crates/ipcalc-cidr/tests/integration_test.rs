use ipcalc_cidr::{create_subnets, CidrError, Network, RenderOptions, Subnets, MAX_SUBNETS};
use ipcalc_core::{parse_address, parse_mask, AddressError};

#[test]
fn test_parse_and_split() {
    let address = parse_address("192.168.0.1").expect("address should parse");
    let mask = parse_mask("/24").expect("mask should parse");
    let child = parse_mask("255.255.255.128").expect("child mask should parse");

    let subnets = create_subnets(address, mask, child).expect("split should succeed");
    assert_eq!(subnets.len(), 2);
    assert_eq!(subnets[0].network().dots(), "192.168.0.0");
    assert_eq!(subnets[0].broadcast().dots(), "192.168.0.127");
    assert_eq!(subnets[1].network().dots(), "192.168.0.128");
    assert_eq!(subnets[1].broadcast().dots(), "192.168.0.255");
}

#[test]
fn test_dots_normalize_valid_inputs() {
    let cases = [
        ("0.0.0.0", "0.0.0.0"),
        ("192.168.000.001", "192.168.0.1"),
        ("255.255.255.255", "255.255.255.255"),
        ("8.8.8.8", "8.8.8.8"),
    ];

    for (input, expected) in cases {
        let net = Network::parse(input, "/32").expect("should parse");
        assert_eq!(net.address().dots(), expected);
    }
}

#[test]
fn test_every_split_of_a_slash_16_is_contiguous() {
    let parent = Network::parse("10.20.0.0", "/16").unwrap();

    for child_len in 17..=24u8 {
        let child_mask = ipcalc_core::prefix_to_mask(child_len);
        let subnets: Vec<Network> = parent
            .subnets(child_mask, MAX_SUBNETS)
            .expect("split should succeed")
            .collect();

        assert_eq!(subnets.len(), 1 << (child_len - 16));
        assert_eq!(subnets[0].network(), parent.network());
        for pair in subnets.windows(2) {
            assert_eq!(
                pair[0].broadcast().value() + 1,
                pair[1].address().value(),
                "gap after {}",
                pair[0]
            );
        }
        assert_eq!(
            subnets.last().unwrap().broadcast().value(),
            parent.broadcast().value()
        );
    }
}

#[test]
fn test_split_errors_surface_through_network() {
    let net = Network::parse("172.16.5.4", "/16").unwrap();

    let err = net.subnets(net.mask().value(), MAX_SUBNETS).unwrap_err();
    assert!(matches!(err, CidrError::PrefixTooSmall { parent: 16, child: 16 }));

    assert!(matches!(
        Subnets::new(0, 0, u32::MAX, MAX_SUBNETS),
        Err(CidrError::TooManySubnets { .. })
    ));
}

#[test]
fn test_parse_errors() {
    assert!(matches!(
        Network::parse("256.168.0.1", "/24"),
        Err(CidrError::Address(AddressError::OutOfRange(_)))
    ));
    assert!(matches!(
        Network::parse("192.168.0.1", "0.255.0.0"),
        Err(CidrError::Address(AddressError::NonContiguousMask(_)))
    ));
}

#[test]
fn test_render_subnet_without_header() {
    let subnets = create_subnets(0xC0A80001, 0xFFFFFF00, 0xFFFFFF80).unwrap();
    let options = RenderOptions {
        description: false,
        extended: false,
        class: false,
    };

    let mut buf = Vec::new();
    subnets[1].render(&mut buf, &options).unwrap();
    assert_eq!(
        String::from_utf8(buf).unwrap(),
        "Network:\t192.168.0.128\n\
         HostMin:\t192.168.0.129\n\
         HostMax:\t192.168.0.254\n\
         Broadcast:\t192.168.0.255\n\
         Hosts/Net:\t126\n"
    );
}
