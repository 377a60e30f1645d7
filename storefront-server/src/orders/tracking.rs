//! Courier tracking-URL synthesis
//!
//! Fixed table of known couriers, matched case-insensitively by substring
//! in declaration order; first match wins, unknown couriers yield an empty
//! URL. `{id}` in a template is replaced with the encoded tracking id.

use urlencoding::encode;

struct CourierPattern {
    matcher: &'static str,
    template: &'static str,
}

const COURIERS: &[CourierPattern] = &[
    CourierPattern {
        matcher: "bluedart",
        template: "https://www.bluedart.com/track?track={id}",
    },
    CourierPattern {
        matcher: "dtdc",
        template: "https://www.dtdc.in/tracking/tracking_results.asp?Ttype=awb_no&strCnno={id}",
    },
    CourierPattern {
        matcher: "delhivery",
        template: "https://www.delhivery.com/track/package/{id}",
    },
    CourierPattern {
        matcher: "ekart",
        template: "https://ekartlogistics.com/track/{id}",
    },
    CourierPattern {
        matcher: "xpressbees",
        template: "https://www.xpressbees.com/track-shipment?isawb=Yes&trackid={id}",
    },
    // India Post tracking has no per-consignment deep link
    CourierPattern {
        matcher: "india post",
        template: "https://www.indiapost.gov.in/_layouts/15/dop.portal.tracking/trackconsignment.aspx",
    },
    CourierPattern {
        matcher: "speed post",
        template: "https://www.indiapost.gov.in/_layouts/15/dop.portal.tracking/trackconsignment.aspx",
    },
];

/// Build a public tracking URL from courier name + tracking id (best-effort)
pub fn build_tracking_url(courier_name: &str, tracking_id: &str) -> String {
    if tracking_id.is_empty() {
        return String::new();
    }
    let name = courier_name.to_lowercase();
    let id = encode(tracking_id);

    for courier in COURIERS {
        if name.contains(courier.matcher) {
            return courier.template.replace("{id}", &id);
        }
    }
    String::new()
}
