use std::env;

/// A way of executing `cpuid`, in priority order.
#[derive(Clone, Copy)]
enum Strategy {
    Intrinsic,
    Native,
    Asm,
}

impl Strategy {
    fn name(self) -> &'static str {
        match self {
            Strategy::Intrinsic => "intrinsic",
            Strategy::Native => "native",
            Strategy::Asm => "asm",
        }
    }
}

struct Target {
    arch: String,
    env: String,
    features: Vec<String>,
}

impl Target {
    fn from_env() -> Target {
        Target {
            arch: env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default(),
            env: env::var("CARGO_CFG_TARGET_ENV").unwrap_or_default(),
            features: env::var("CARGO_CFG_TARGET_FEATURE")
                .unwrap_or_default()
                .split(',')
                .map(str::to_owned)
                .collect(),
        }
    }

    fn has_feature(&self, name: &str) -> bool {
        self.features.iter().any(|f| f == name)
    }
}

fn feature_enabled(name: &str) -> bool {
    env::var_os(format!("CARGO_FEATURE_{}", name)).is_some()
}

fn select(target: &Target) -> Result<Strategy, &'static str> {
    if target.arch != "x86" && target.arch != "x86_64" {
        return Err("arch");
    }
    if target.env == "sgx" {
        return Err("sgx");
    }
    if feature_enabled("INTRINSIC") {
        return Ok(Strategy::Intrinsic);
    }
    // raw-cpuid only exports its native reader on 32-bit x86 with sse
    if feature_enabled("NATIVE") && (target.arch == "x86_64" || target.has_feature("sse")) {
        return Ok(Strategy::Native);
    }
    if feature_enabled("INLINE_ASM") {
        return Ok(Strategy::Asm);
    }
    Err("features")
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rustc-check-cfg=cfg(cpuid_strategy, values(\"intrinsic\", \"native\", \"asm\"))");
    println!("cargo:rustc-check-cfg=cfg(cpuid_unsupported, values(\"arch\", \"sgx\", \"features\"))");
    println!("cargo:rustc-check-cfg=cfg(cpuid_supported)");

    match select(&Target::from_env()) {
        Ok(strategy) => {
            println!("cargo:rustc-cfg=cpuid_supported");
            println!("cargo:rustc-cfg=cpuid_strategy=\"{}\"", strategy.name());
        }
        Err(reason) => println!("cargo:rustc-cfg=cpuid_unsupported=\"{}\"", reason),
    }
}
